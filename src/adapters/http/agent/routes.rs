//! HTTP routes for the agent endpoint.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{agent_info, run_agent, AgentHandlers};

pub fn agent_routes(handlers: AgentHandlers) -> Router {
    Router::new()
        .route("/", post(run_agent))
        .route("/info", get(agent_info))
        .with_state(handlers)
}
