//! Chat handlers - persisted assistant conversations.

mod record_agent_turn;
mod send_chat_message;
mod sessions;

pub use record_agent_turn::{RecordAgentTurnCommand, RecordAgentTurnHandler};
pub use send_chat_message::{SendChatMessageCommand, SendChatMessageHandler, SendChatMessageResult};
pub use sessions::{
    ChatSessionView, DeleteChatSessionHandler, GetChatSessionHandler, ListChatSessionsHandler,
};

use crate::domain::chat::ChatSession;
use crate::domain::foundation::{ChatSessionId, DomainError, ErrorCode, UserId};
use crate::ports::ChatRepository;

/// Loads a session, hiding other users' sessions as not found.
pub(crate) async fn load_owned_session(
    repository: &dyn ChatRepository,
    session_id: &ChatSessionId,
    user_id: &UserId,
) -> Result<ChatSession, DomainError> {
    repository
        .find_session(session_id)
        .await?
        .filter(|s| s.is_owned_by(user_id))
        .ok_or_else(|| DomainError::not_found(ErrorCode::ChatSessionNotFound, "Chat session not found"))
}
