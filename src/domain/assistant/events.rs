//! AG-UI stream events.

use serde::Serialize;

use super::context::Role;
use super::identity::RunIdentity;
use crate::domain::foundation::Timestamp;

/// Error code carried by every `RUN_ERROR` event.
pub const AGENT_ERROR_CODE: &str = "AGENT_ERROR";

/// Kind-specific payload of a stream event.
///
/// Serialized with a `type` tag such as `RUN_STARTED` or
/// `TEXT_MESSAGE_CONTENT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    RunStarted { thread_id: String, run_id: String },
    TextMessageStart { message_id: String, role: Role },
    TextMessageContent { message_id: String, delta: String },
    TextMessageEnd { message_id: String },
    RunFinished { thread_id: String, run_id: String },
    RunError { message: String, code: String },
}

/// An event plus the epoch-millisecond time it was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamEvent {
    #[serde(flatten)]
    pub kind: EventKind,
    pub timestamp: i64,
}

impl StreamEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            timestamp: Timestamp::now().epoch_millis(),
        }
    }

    pub fn run_started(identity: &RunIdentity) -> Self {
        Self::new(EventKind::RunStarted {
            thread_id: identity.thread_id().to_string(),
            run_id: identity.run_id().to_string(),
        })
    }

    pub fn message_started(identity: &RunIdentity) -> Self {
        Self::new(EventKind::TextMessageStart {
            message_id: identity.message_id().to_string(),
            role: Role::Assistant,
        })
    }

    pub fn message_delta(identity: &RunIdentity, delta: impl Into<String>) -> Self {
        Self::new(EventKind::TextMessageContent {
            message_id: identity.message_id().to_string(),
            delta: delta.into(),
        })
    }

    pub fn message_ended(identity: &RunIdentity) -> Self {
        Self::new(EventKind::TextMessageEnd {
            message_id: identity.message_id().to_string(),
        })
    }

    pub fn run_finished(identity: &RunIdentity) -> Self {
        Self::new(EventKind::RunFinished {
            thread_id: identity.thread_id().to_string(),
            run_id: identity.run_id().to_string(),
        })
    }

    pub fn run_error(message: impl Into<String>) -> Self {
        Self::new(EventKind::RunError {
            message: message.into(),
            code: AGENT_ERROR_CODE.to_string(),
        })
    }

    /// Wire name of the event type.
    pub fn event_type(&self) -> &'static str {
        match self.kind {
            EventKind::RunStarted { .. } => "RUN_STARTED",
            EventKind::TextMessageStart { .. } => "TEXT_MESSAGE_START",
            EventKind::TextMessageContent { .. } => "TEXT_MESSAGE_CONTENT",
            EventKind::TextMessageEnd { .. } => "TEXT_MESSAGE_END",
            EventKind::RunFinished { .. } => "RUN_FINISHED",
            EventKind::RunError { .. } => "RUN_ERROR",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.kind,
            EventKind::RunFinished { .. } | EventKind::RunError { .. }
        )
    }
}
