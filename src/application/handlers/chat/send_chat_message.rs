//! SendChatMessageHandler - non-streaming assistant turn with persistence.
//!
//! Nothing is written until the model has answered: a failed call leaves
//! the session exactly as it was, and a new session is only created once
//! there is a complete exchange to put in it.

use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use super::super::ai_failure;
use super::load_owned_session;
use crate::domain::assistant::{
    attach_trip_context, ContextBuilder, ContextError, HistoryRecord, Transcript,
};
use crate::domain::chat::{ChatMessage, ChatSession};
use crate::domain::foundation::{ChatSessionId, DomainError, UserId};
use crate::ports::{AIProvider, ChatRepository, CompletionParams, CompletionRequest};

#[derive(Debug, Clone)]
pub struct SendChatMessageCommand {
    pub user_id: UserId,
    pub message: String,
    /// Continue this session; a new one is started when absent.
    pub session_id: Option<ChatSessionId>,
    /// Trip snapshot appended to the prompt (not stored).
    pub trip_context: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct SendChatMessageResult {
    pub session_id: ChatSessionId,
    pub message: String,
    pub metadata: Option<Value>,
}

pub struct SendChatMessageHandler {
    chat_repository: Arc<dyn ChatRepository>,
    ai_provider: Arc<dyn AIProvider>,
    params: CompletionParams,
    context_builder: ContextBuilder,
}

impl SendChatMessageHandler {
    pub fn new(
        chat_repository: Arc<dyn ChatRepository>,
        ai_provider: Arc<dyn AIProvider>,
        params: CompletionParams,
    ) -> Self {
        Self {
            chat_repository,
            ai_provider,
            params,
            context_builder: ContextBuilder::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: SendChatMessageCommand,
    ) -> Result<SendChatMessageResult, DomainError> {
        if cmd.message.trim().is_empty() {
            return Err(ContextError::EmptyInput.into());
        }
        let input = match &cmd.trip_context {
            Some(trip) => attach_trip_context(&cmd.message, trip),
            None => cmd.message.clone(),
        };

        let (session, history) = match cmd.session_id {
            Some(id) => {
                let session =
                    load_owned_session(self.chat_repository.as_ref(), &id, &cmd.user_id).await?;
                let history: Vec<HistoryRecord> = self
                    .chat_repository
                    .messages(&session.id)
                    .await?
                    .iter()
                    .map(ChatMessage::to_history_record)
                    .collect();
                (Some(session), history)
            }
            None => (None, Vec::new()),
        };
        let context = self.context_builder.build(&history, &input)?;

        let request = CompletionRequest::new(context.into_messages()).with_params(self.params);
        let response = self.ai_provider.complete(request).await.map_err(ai_failure)?;
        if response.finish_reason.is_truncated() {
            warn!(
                model = %response.model,
                finish_reason = %response.finish_reason,
                "Chat reply was cut short"
            );
        }

        let session = match session {
            Some(session) => session,
            None => {
                let session = ChatSession::start(cmd.user_id, None);
                self.chat_repository.save_session(&session).await?;
                session
            }
        };
        self.chat_repository
            .append_message(&ChatMessage::user(session.id, cmd.message.trim()))
            .await?;
        let transcript = Transcript::from_text(response.content);
        let reply = ChatMessage::assistant(session.id, transcript.clone());
        self.chat_repository.append_message(&reply).await?;

        info!(
            session_id = %session.id,
            model = %response.model,
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            total_tokens = response.usage.total_tokens,
            has_payload = transcript.payload.is_some(),
            "Chat turn completed"
        );

        Ok(SendChatMessageResult {
            session_id: session.id,
            message: transcript.text,
            metadata: transcript.payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::memory::InMemoryChatRepository;
    use crate::domain::assistant::Role;
    use crate::domain::foundation::ErrorCode;
    use serde_json::json;

    fn handler(
        repo: &InMemoryChatRepository,
        provider: &MockAIProvider,
    ) -> SendChatMessageHandler {
        SendChatMessageHandler::new(
            Arc::new(repo.clone()),
            Arc::new(provider.clone()),
            CompletionParams::default(),
        )
    }

    fn command(user_id: UserId, message: &str) -> SendChatMessageCommand {
        SendChatMessageCommand {
            user_id,
            message: message.to_string(),
            session_id: None,
            trip_context: None,
        }
    }

    #[tokio::test]
    async fn first_message_starts_session_and_stores_both_sides() {
        let repo = InMemoryChatRepository::new();
        let provider =
            MockAIProvider::new().with_response("Try Porto!\n```json\n{\"city\": \"Porto\"}\n```");
        let user = UserId::new();

        let result = handler(&repo, &provider)
            .handle(command(user, "Where should I go?"))
            .await
            .unwrap();

        assert_eq!(result.metadata, Some(json!({"city": "Porto"})));
        let stored = repo.messages(&result.session_id).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].role, Role::User);
        assert_eq!(stored[1].metadata, Some(json!({"city": "Porto"})));
    }

    #[tokio::test]
    async fn follow_up_includes_stored_history_once() {
        let repo = InMemoryChatRepository::new();
        let provider = MockAIProvider::new()
            .with_response("First answer")
            .with_response("Second answer");
        let user = UserId::new();
        let handler = handler(&repo, &provider);

        let first = handler.handle(command(user, "Question one")).await.unwrap();
        let mut follow_up = command(user, "Question two");
        follow_up.session_id = Some(first.session_id);
        handler.handle(follow_up).await.unwrap();

        let messages = &provider.get_calls()[1].messages;
        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(&contents[1..], &["Question one", "First answer", "Question two"]);
    }

    #[tokio::test]
    async fn trip_context_goes_to_the_model_but_not_storage() {
        let repo = InMemoryChatRepository::new();
        let provider = MockAIProvider::new().with_response("ok");
        let mut cmd = command(UserId::new(), "Any tips?");
        cmd.trip_context = Some(json!({"destination": "Kyoto"}));

        let result = handler(&repo, &provider).handle(cmd).await.unwrap();

        let sent = &provider.get_calls()[0].messages;
        assert!(sent.last().unwrap().content.contains("Current trip context"));
        let stored = repo.messages(&result.session_id).await.unwrap();
        assert_eq!(stored[0].content, "Any tips?");
    }

    #[tokio::test]
    async fn foreign_session_is_not_found() {
        let repo = InMemoryChatRepository::new();
        let session = ChatSession::start(UserId::new(), None);
        repo.save_session(&session).await.unwrap();
        let mut cmd = command(UserId::new(), "Hi");
        cmd.session_id = Some(session.id);

        let err = handler(&repo, &MockAIProvider::new())
            .handle(cmd)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ChatSessionNotFound);
    }

    #[tokio::test]
    async fn blank_message_is_rejected_without_creating_session() {
        let repo = InMemoryChatRepository::new();
        let user = UserId::new();

        let err = handler(&repo, &MockAIProvider::new())
            .handle(command(user, "  "))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert!(repo.list_sessions(&user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn provider_failure_is_reported_without_starting_a_session() {
        let repo = InMemoryChatRepository::new();
        let provider = MockAIProvider::new().with_error(MockError::AuthenticationFailed);
        let user = UserId::new();

        let err = handler(&repo, &provider)
            .handle(command(user, "Hi"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::AIProviderError);
        assert!(repo.list_sessions(&user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn provider_failure_leaves_existing_session_untouched() {
        let repo = InMemoryChatRepository::new();
        let provider = MockAIProvider::new()
            .with_response("First answer")
            .with_error(MockError::AuthenticationFailed)
            .with_response("Second answer");
        let user = UserId::new();
        let handler = handler(&repo, &provider);
        let first = handler.handle(command(user, "Question one")).await.unwrap();

        let mut failed = command(user, "Question two");
        failed.session_id = Some(first.session_id);
        let err = handler.handle(failed).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::AIProviderError);
        assert_eq!(repo.messages(&first.session_id).await.unwrap().len(), 2);

        let mut retry = command(user, "Question two");
        retry.session_id = Some(first.session_id);
        handler.handle(retry).await.unwrap();

        let sent = &provider.get_calls()[2].messages;
        let contents: Vec<&str> = sent.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(&contents[1..], &["Question one", "First answer", "Question two"]);
        assert_eq!(repo.messages(&first.session_id).await.unwrap().len(), 4);
    }
}
