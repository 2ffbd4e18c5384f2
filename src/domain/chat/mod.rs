//! Chat module - persisted conversation transcripts.

use serde_json::Value;

use crate::domain::assistant::{HistoryRecord, Role, Transcript};
use crate::domain::foundation::{ChatMessageId, ChatSessionId, Timestamp, TripId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSession {
    pub id: ChatSessionId,
    pub owner: UserId,
    pub trip_id: Option<TripId>,
    pub created_at: Timestamp,
}

impl ChatSession {
    pub fn start(owner: UserId, trip_id: Option<TripId>) -> Self {
        Self {
            id: ChatSessionId::new(),
            owner,
            trip_id,
            created_at: Timestamp::now(),
        }
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner == user
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: ChatMessageId,
    pub session_id: ChatSessionId,
    pub role: Role,
    pub content: String,
    pub metadata: Option<Value>,
    pub created_at: Timestamp,
}

impl ChatMessage {
    pub fn user(session_id: ChatSessionId, content: impl Into<String>) -> Self {
        Self {
            id: ChatMessageId::new(),
            session_id,
            role: Role::User,
            content: content.into(),
            metadata: None,
            created_at: Timestamp::now(),
        }
    }

    /// Assistant reply carrying the extracted payload as metadata.
    pub fn assistant(session_id: ChatSessionId, transcript: Transcript) -> Self {
        Self {
            id: ChatMessageId::new(),
            session_id,
            role: Role::Assistant,
            content: transcript.text,
            metadata: transcript.payload,
            created_at: Timestamp::now(),
        }
    }

    pub fn to_history_record(&self) -> HistoryRecord {
        HistoryRecord::new(self.role.as_str(), self.content.clone())
    }
}
