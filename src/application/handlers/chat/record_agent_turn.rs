//! RecordAgentTurnHandler - stores a finished streamed turn in a chat session.

use std::sync::Arc;
use tracing::debug;

use crate::domain::assistant::Transcript;
use crate::domain::chat::ChatMessage;
use crate::domain::foundation::{ChatSessionId, DomainError, UserId};
use crate::ports::ChatRepository;

#[derive(Debug, Clone)]
pub struct RecordAgentTurnCommand {
    pub user_id: UserId,
    pub thread_id: String,
    pub user_input: String,
    pub transcript: Transcript,
}

pub struct RecordAgentTurnHandler {
    chat_repository: Arc<dyn ChatRepository>,
}

impl RecordAgentTurnHandler {
    pub fn new(chat_repository: Arc<dyn ChatRepository>) -> Self {
        Self { chat_repository }
    }

    /// Returns `true` when the thread named an owned session and the turn
    /// was appended. Any other thread id is left alone.
    pub async fn handle(&self, cmd: RecordAgentTurnCommand) -> Result<bool, DomainError> {
        let Ok(session_id) = cmd.thread_id.parse::<ChatSessionId>() else {
            return Ok(false);
        };
        let owned = self
            .chat_repository
            .find_session(&session_id)
            .await?
            .is_some_and(|s| s.is_owned_by(&cmd.user_id));
        if !owned {
            debug!(thread_id = %cmd.thread_id, "Thread is not an owned chat session");
            return Ok(false);
        }

        self.chat_repository
            .append_message(&ChatMessage::user(session_id, cmd.user_input))
            .await?;
        self.chat_repository
            .append_message(&ChatMessage::assistant(session_id, cmd.transcript))
            .await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryChatRepository;
    use crate::domain::chat::ChatSession;

    fn command(user_id: UserId, thread_id: String) -> RecordAgentTurnCommand {
        RecordAgentTurnCommand {
            user_id,
            thread_id,
            user_input: "Plan Lisbon".to_string(),
            transcript: Transcript::from_text("Day 1: Arrive."),
        }
    }

    #[tokio::test]
    async fn appends_to_owned_session() {
        let repo = InMemoryChatRepository::new();
        let user = UserId::new();
        let session = ChatSession::start(user, None);
        repo.save_session(&session).await.unwrap();

        let handler = RecordAgentTurnHandler::new(Arc::new(repo.clone()));
        assert!(handler.handle(command(user, session.id.to_string())).await.unwrap());

        let messages = repo.messages(&session.id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].content, "Day 1: Arrive.");
    }

    #[tokio::test]
    async fn ignores_generated_and_foreign_threads() {
        let repo = InMemoryChatRepository::new();
        let session = ChatSession::start(UserId::new(), None);
        repo.save_session(&session).await.unwrap();
        let handler = RecordAgentTurnHandler::new(Arc::new(repo.clone()));

        let stranger = UserId::new();
        assert!(!handler.handle(command(stranger, "thread_1a2b3c4d".into())).await.unwrap());
        assert!(!handler.handle(command(stranger, session.id.to_string())).await.unwrap());
        assert!(repo.messages(&session.id).await.unwrap().is_empty());
    }
}
