//! HTTP routes for the CopilotKit endpoint.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{copilot_info, run_copilot, CopilotKitHandlers};

pub fn copilotkit_routes(handlers: CopilotKitHandlers) -> Router {
    Router::new()
        .route("/", post(run_copilot))
        .route("/info", get(copilot_info))
        .with_state(handlers)
}
