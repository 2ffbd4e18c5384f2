//! CopilotTurnHandler - one non-streaming completion for the CopilotKit
//! remote endpoint.
//!
//! Nothing is persisted. The reply is produced by a single `complete` call
//! and the transport decides how to frame it.

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::split_at_last_user;
use crate::domain::assistant::{ContextBuilder, HistoryRecord, RunIdentity, Transcript};
use crate::ports::{AIError, AIProvider, CompletionParams, CompletionRequest};

#[derive(Debug, Clone)]
pub struct CopilotTurnCommand {
    /// Client transcript, newest last.
    pub messages: Vec<HistoryRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CopilotReply {
    pub message_id: String,
    pub transcript: Transcript,
}

pub struct CopilotTurnHandler {
    ai_provider: Arc<dyn AIProvider>,
    params: CompletionParams,
    context_builder: ContextBuilder,
}

impl CopilotTurnHandler {
    pub fn new(ai_provider: Arc<dyn AIProvider>, params: CompletionParams) -> Self {
        Self {
            ai_provider,
            params,
            context_builder: ContextBuilder::new(),
        }
    }

    /// Answers the last user message.
    ///
    /// `Ok(None)` means there was no non-blank user message to answer and
    /// the model was not called.
    pub async fn handle(&self, cmd: CopilotTurnCommand) -> Result<Option<CopilotReply>, AIError> {
        let Some((history, input)) = split_at_last_user(&cmd.messages) else {
            debug!("CopilotKit request had no user message");
            return Ok(None);
        };
        let Ok(context) = self.context_builder.build(history, &input.content) else {
            debug!("CopilotKit request had a blank user message");
            return Ok(None);
        };

        let request = CompletionRequest::new(context.into_messages()).with_params(self.params);
        let response = self.ai_provider.complete(request).await.map_err(|e| {
            warn!(error = %e, "CopilotKit completion failed");
            e
        })?;

        let transcript = Transcript::from_text(response.content);
        info!(
            model = %response.model,
            total_tokens = response.usage.total_tokens,
            finish_reason = %response.finish_reason,
            has_payload = transcript.payload.is_some(),
            "CopilotKit turn completed"
        );

        Ok(Some(CopilotReply {
            message_id: RunIdentity::mint(None).message_id().to_string(),
            transcript,
        }))
    }
}
