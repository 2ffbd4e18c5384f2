use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::chat::{ChatMessage, ChatSession};
use crate::domain::foundation::{ChatSessionId, DomainError, ErrorCode, UserId};
use crate::ports::ChatRepository;

#[derive(Debug, Default)]
struct ChatStore {
    sessions: HashMap<ChatSessionId, ChatSession>,
    messages: HashMap<ChatSessionId, Vec<ChatMessage>>,
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryChatRepository {
    store: Arc<RwLock<ChatStore>>,
}

impl InMemoryChatRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn session_not_found() -> DomainError {
    DomainError::not_found(ErrorCode::ChatSessionNotFound, "Chat session not found")
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn save_session(&self, session: &ChatSession) -> Result<(), DomainError> {
        self.store
            .write()
            .await
            .sessions
            .insert(session.id, session.clone());
        Ok(())
    }

    async fn find_session(&self, id: &ChatSessionId) -> Result<Option<ChatSession>, DomainError> {
        Ok(self.store.read().await.sessions.get(id).cloned())
    }

    async fn list_sessions(&self, owner: &UserId) -> Result<Vec<ChatSession>, DomainError> {
        let mut sessions: Vec<ChatSession> = self
            .store
            .read()
            .await
            .sessions
            .values()
            .filter(|s| s.is_owned_by(owner))
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sessions)
    }

    async fn delete_session(&self, id: &ChatSessionId) -> Result<(), DomainError> {
        let mut store = self.store.write().await;
        store.sessions.remove(id).ok_or_else(session_not_found)?;
        store.messages.remove(id);
        Ok(())
    }

    async fn append_message(&self, message: &ChatMessage) -> Result<(), DomainError> {
        let mut store = self.store.write().await;
        if !store.sessions.contains_key(&message.session_id) {
            return Err(session_not_found());
        }
        store
            .messages
            .entry(message.session_id)
            .or_default()
            .push(message.clone());
        Ok(())
    }

    async fn messages(&self, session_id: &ChatSessionId) -> Result<Vec<ChatMessage>, DomainError> {
        Ok(self
            .store
            .read()
            .await
            .messages
            .get(session_id)
            .cloned()
            .unwrap_or_default())
    }
}
