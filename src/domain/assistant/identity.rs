//! Identifiers for one streamed turn.

use uuid::Uuid;

fn short_id(prefix: &str) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}_{}", prefix, &hex[..8])
}

/// Thread, run and message identifiers for a single run.
///
/// The thread id may come from the caller; run and message ids are
/// always minted fresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunIdentity {
    thread_id: String,
    run_id: String,
    message_id: String,
}

impl RunIdentity {
    pub fn mint(thread_id: Option<String>) -> Self {
        let thread_id = thread_id
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| short_id("thread"));

        Self {
            thread_id,
            run_id: short_id("run"),
            message_id: short_id("msg"),
        }
    }

    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn message_id(&self) -> &str {
        &self.message_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mints_prefixed_short_ids() {
        let identity = RunIdentity::mint(None);

        assert!(identity.thread_id().starts_with("thread_"));
        assert_eq!(identity.run_id().len(), "run_".len() + 8);
        assert!(identity.message_id().starts_with("msg_"));
    }

    #[test]
    fn caller_thread_id_is_kept() {
        let identity = RunIdentity::mint(Some("thread_custom".to_string()));
        assert_eq!(identity.thread_id(), "thread_custom");
    }

    #[test]
    fn caller_thread_id_is_not_trimmed() {
        let identity = RunIdentity::mint(Some(" thread custom ".to_string()));
        assert_eq!(identity.thread_id(), " thread custom ");
    }

    #[test]
    fn blank_thread_id_is_replaced() {
        let identity = RunIdentity::mint(Some("   ".to_string()));
        assert!(identity.thread_id().starts_with("thread_"));
    }

    #[test]
    fn runs_on_the_same_thread_get_fresh_ids() {
        let a = RunIdentity::mint(Some("t".to_string()));
        let b = RunIdentity::mint(Some("t".to_string()));

        assert_eq!(a.thread_id(), b.thread_id());
        assert_ne!(a.run_id(), b.run_id());
        assert_ne!(a.message_id(), b.message_id());
    }
}
