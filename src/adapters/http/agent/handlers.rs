//! HTTP handlers for the agent endpoint.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use futures::StreamExt;
use serde_json::Value;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, info};

use super::dto::{agent_descriptor, AgentRequest};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::OptionalAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::chat::{RecordAgentTurnCommand, RecordAgentTurnHandler};
use crate::application::{AgentRunner, RunOutcome};
use crate::domain::assistant::{encode_event, StreamEvent};

const X_ACCEL_BUFFERING: HeaderName = HeaderName::from_static("x-accel-buffering");

#[derive(Clone)]
pub struct AgentHandlers {
    runner: Arc<AgentRunner>,
    recorder: Arc<RecordAgentTurnHandler>,
    channel_capacity: usize,
}

impl AgentHandlers {
    pub fn new(state: &AppState) -> Self {
        Self {
            runner: Arc::new(AgentRunner::new(state.ai_provider.clone(), state.completion)),
            recorder: Arc::new(RecordAgentTurnHandler::new(state.chats.clone())),
            channel_capacity: state.channel_capacity.max(1),
        }
    }
}

/// POST /api/agent
///
/// Input problems are answered with a plain 400 before the stream opens.
/// Once the 200 is committed every failure travels as a `RUN_ERROR` frame.
pub async fn run_agent(
    State(handlers): State<AgentHandlers>,
    OptionalAuth(user): OptionalAuth,
    payload: Result<Json<AgentRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;
    let turn = handlers.runner.prepare(req.into())?;

    let thread_id = turn.identity().thread_id().to_string();
    let user_input = turn.user_input().to_string();
    let (mut tx, rx) = mpsc::channel::<StreamEvent>(handlers.channel_capacity);

    let runner = handlers.runner.clone();
    let recorder = handlers.recorder.clone();
    tokio::spawn(async move {
        let outcome = runner.run(turn, &mut tx).await;
        drop(tx);

        let (RunOutcome::Finished { transcript, .. }, Some(user)) = (outcome, user) else {
            return;
        };
        let cmd = RecordAgentTurnCommand {
            user_id: user.id,
            thread_id,
            user_input,
            transcript,
        };
        match recorder.handle(cmd).await {
            Ok(true) => info!(user_id = %user.id, "Agent turn saved to chat session"),
            Ok(false) => {}
            Err(e) => error!(error = %e, "Failed to save agent turn"),
        }
    });

    let frames = ReceiverStream::new(rx).map(|event| {
        encode_event(&event).map_err(|e| {
            error!(error = %e, event_type = event.event_type(), "Failed to encode stream event");
            e
        })
    });

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("text/event-stream")),
            (header::CACHE_CONTROL, HeaderValue::from_static("no-cache")),
            (header::CONNECTION, HeaderValue::from_static("keep-alive")),
            (X_ACCEL_BUFFERING, HeaderValue::from_static("no")),
        ],
        Body::from_stream(frames),
    )
        .into_response())
}

/// GET /api/agent/info
pub async fn agent_info() -> Json<Value> {
    Json(agent_descriptor())
}
