//! Assistant handlers - the streamed agent turn and the single-shot
//! CopilotKit turn.

mod copilot_turn;
mod run_agent_turn;

pub use copilot_turn::{CopilotReply, CopilotTurnCommand, CopilotTurnHandler};
pub use run_agent_turn::{AgentRunner, AgentTurnCommand, PreparedTurn, RunOutcome};

use crate::domain::assistant::{HistoryRecord, Role};

/// Splits a client transcript at its last user message.
///
/// Returns the records before that message and the message itself;
/// anything after it is discarded.
fn split_at_last_user(messages: &[HistoryRecord]) -> Option<(&[HistoryRecord], &HistoryRecord)> {
    let at = messages
        .iter()
        .rposition(|m| Role::parse(&m.role) == Some(Role::User))?;
    Some((&messages[..at], &messages[at]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_before_the_last_user_message() {
        let messages = vec![
            HistoryRecord::new("user", "first"),
            HistoryRecord::new("assistant", "reply"),
            HistoryRecord::new("user", "second"),
            HistoryRecord::new("assistant", "trailing"),
        ];

        let (history, input) = split_at_last_user(&messages).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(input.content, "second");
    }

    #[test]
    fn no_user_message_means_no_input() {
        let messages = vec![HistoryRecord::new("assistant", "Hello")];
        assert!(split_at_last_user(&messages).is_none());
        assert!(split_at_last_user(&[]).is_none());
    }
}
