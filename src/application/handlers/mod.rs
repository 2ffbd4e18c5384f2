//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Handlers
//! own `Arc<dyn Port>` dependencies and return `DomainError`.

pub mod assistant;
pub mod auth;
pub mod chat;
pub mod checklist;
pub mod itinerary;
pub mod trip;

use tracing::warn;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::AIError;

/// Maps a failed model call for request/response endpoints.
pub(crate) fn ai_failure(err: AIError) -> DomainError {
    warn!(error = %err, "AI provider call failed");
    DomainError::new(ErrorCode::AIProviderError, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ai_failure_keeps_provider_message() {
        let err = ai_failure(AIError::Timeout);
        assert_eq!(err.code(), ErrorCode::AIProviderError);
        assert!(err.to_string().contains("request timed out"));
    }
}
