//! HTTP handlers for the CopilotKit endpoint.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use futures::stream::{self, StreamExt};
use serde_json::Value;
use tracing::error;

use super::dto::{copilot_actions_descriptor, CopilotFrame, CopilotRequest, DONE_FRAME};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::application::CopilotTurnHandler;

#[derive(Clone)]
pub struct CopilotKitHandlers {
    turns: Arc<CopilotTurnHandler>,
}

impl CopilotKitHandlers {
    pub fn new(state: &AppState) -> Self {
        Self {
            turns: Arc::new(CopilotTurnHandler::new(
                state.ai_provider.clone(),
                state.completion,
            )),
        }
    }
}

/// POST /api/copilotkit
///
/// Only a malformed body is answered with a 400. Model failures arrive as
/// an `error` frame followed by `[DONE]`.
pub async fn run_copilot(
    State(handlers): State<CopilotKitHandlers>,
    payload: Result<Json<CopilotRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;
    let turns = handlers.turns;

    let frames = stream::once(async move { CopilotFrame::for_outcome(turns.handle(req.into()).await) })
        .flat_map(stream::iter)
        .filter_map(|frame| async move {
            match frame.encode() {
                Ok(text) => Some(text),
                Err(e) => {
                    error!(error = %e, "Failed to encode CopilotKit frame");
                    None
                }
            }
        })
        .chain(stream::once(async { DONE_FRAME.to_string() }))
        .map(Ok::<_, Infallible>);

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("text/event-stream")),
            (header::CACHE_CONTROL, HeaderValue::from_static("no-cache")),
            (header::CONNECTION, HeaderValue::from_static("keep-alive")),
        ],
        Body::from_stream(frames),
    )
        .into_response())
}

/// GET /api/copilotkit/info
pub async fn copilot_info() -> Json<Value> {
    Json(copilot_actions_descriptor())
}
