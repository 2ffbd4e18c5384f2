//! HTTP routes for chat endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{delete_session, get_session, list_sessions, send_message, ChatHandlers};

pub fn chat_routes(handlers: ChatHandlers) -> Router {
    Router::new()
        .route("/", post(send_message))
        .route("/sessions", get(list_sessions))
        .route("/sessions/:id", get(get_session).delete(delete_session))
        .with_state(handlers)
}
