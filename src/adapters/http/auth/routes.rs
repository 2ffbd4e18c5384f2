//! HTTP routes for account endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{google_sign_in, login, logout, me, register, AuthHandlers};

pub fn auth_routes(handlers: AuthHandlers) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/google", post(google_sign_in))
        .route("/me", get(me))
        .route("/logout", post(logout))
        .with_state(handlers)
}
