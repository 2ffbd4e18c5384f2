//! Chat session queries and deletion.

use std::sync::Arc;

use super::load_owned_session;
use crate::domain::chat::{ChatMessage, ChatSession};
use crate::domain::foundation::{ChatSessionId, DomainError, UserId};
use crate::ports::ChatRepository;

pub struct ListChatSessionsHandler {
    chat_repository: Arc<dyn ChatRepository>,
}

impl ListChatSessionsHandler {
    pub fn new(chat_repository: Arc<dyn ChatRepository>) -> Self {
        Self { chat_repository }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<Vec<ChatSession>, DomainError> {
        self.chat_repository.list_sessions(user_id).await
    }
}

/// A session with its transcript, oldest message first.
#[derive(Debug, Clone)]
pub struct ChatSessionView {
    pub session: ChatSession,
    pub messages: Vec<ChatMessage>,
}

pub struct GetChatSessionHandler {
    chat_repository: Arc<dyn ChatRepository>,
}

impl GetChatSessionHandler {
    pub fn new(chat_repository: Arc<dyn ChatRepository>) -> Self {
        Self { chat_repository }
    }

    pub async fn handle(
        &self,
        user_id: &UserId,
        session_id: &ChatSessionId,
    ) -> Result<ChatSessionView, DomainError> {
        let session =
            load_owned_session(self.chat_repository.as_ref(), session_id, user_id).await?;
        let messages = self.chat_repository.messages(&session.id).await?;
        Ok(ChatSessionView { session, messages })
    }
}

pub struct DeleteChatSessionHandler {
    chat_repository: Arc<dyn ChatRepository>,
}

impl DeleteChatSessionHandler {
    pub fn new(chat_repository: Arc<dyn ChatRepository>) -> Self {
        Self { chat_repository }
    }

    pub async fn handle(
        &self,
        user_id: &UserId,
        session_id: &ChatSessionId,
    ) -> Result<(), DomainError> {
        let session =
            load_owned_session(self.chat_repository.as_ref(), session_id, user_id).await?;
        self.chat_repository.delete_session(&session.id).await
    }
}
