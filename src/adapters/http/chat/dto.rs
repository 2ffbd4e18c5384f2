//! HTTP DTOs for chat endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::handlers::chat::{ChatSessionView, SendChatMessageResult};
use crate::domain::chat::{ChatMessage, ChatSession};
use crate::domain::foundation::Timestamp;

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub trip_context: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub message: String,
    pub metadata: Option<Value>,
}

impl From<SendChatMessageResult> for ChatResponse {
    fn from(result: SendChatMessageResult) -> Self {
        Self {
            session_id: result.session_id.to_string(),
            message: result.message,
            metadata: result.metadata,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessageResponse {
    pub id: String,
    pub session_id: String,
    pub role: &'static str,
    pub content: String,
    pub metadata: Option<Value>,
    pub created_at: Timestamp,
}

impl From<ChatMessage> for ChatMessageResponse {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.id.to_string(),
            session_id: message.session_id.to_string(),
            role: message.role.as_str(),
            content: message.content,
            metadata: message.metadata,
            created_at: message.created_at,
        }
    }
}

/// A session; `messages` is empty in listings.
#[derive(Debug, Clone, Serialize)]
pub struct ChatSessionResponse {
    pub id: String,
    pub user_id: String,
    pub trip_id: Option<String>,
    pub created_at: Timestamp,
    pub messages: Vec<ChatMessageResponse>,
}

impl From<ChatSession> for ChatSessionResponse {
    fn from(session: ChatSession) -> Self {
        Self {
            id: session.id.to_string(),
            user_id: session.owner.to_string(),
            trip_id: session.trip_id.map(|id| id.to_string()),
            created_at: session.created_at,
            messages: Vec::new(),
        }
    }
}

impl From<ChatSessionView> for ChatSessionResponse {
    fn from(view: ChatSessionView) -> Self {
        let mut response = Self::from(view.session);
        response.messages = view
            .messages
            .into_iter()
            .map(ChatMessageResponse::from)
            .collect();
        response
    }
}
