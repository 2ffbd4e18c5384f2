//! Chat transcript repository port.

use async_trait::async_trait;

use crate::domain::chat::{ChatMessage, ChatSession};
use crate::domain::foundation::{ChatSessionId, DomainError, UserId};

#[async_trait]
pub trait ChatRepository: Send + Sync {
    async fn save_session(&self, session: &ChatSession) -> Result<(), DomainError>;

    async fn find_session(&self, id: &ChatSessionId) -> Result<Option<ChatSession>, DomainError>;

    /// Sessions of a user, newest first.
    async fn list_sessions(&self, owner: &UserId) -> Result<Vec<ChatSession>, DomainError>;

    /// Removes the session and its messages.
    ///
    /// # Errors
    ///
    /// - `ChatSessionNotFound` if the session doesn't exist
    async fn delete_session(&self, id: &ChatSessionId) -> Result<(), DomainError>;

    async fn append_message(&self, message: &ChatMessage) -> Result<(), DomainError>;

    /// Messages of a session, oldest first.
    async fn messages(&self, session_id: &ChatSessionId) -> Result<Vec<ChatMessage>, DomainError>;
}
