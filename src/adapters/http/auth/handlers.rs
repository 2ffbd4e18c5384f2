//! HTTP handlers for account endpoints.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use super::dto::{GoogleAuthRequest, LoginRequest, RegisterRequest, TokenResponse, UserResponse};
use crate::adapters::http::dto::MessageResponse;
use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::auth::{
    CurrentUserHandler, GoogleSignInCommand, GoogleSignInHandler, LoginCommand, LoginHandler,
    RegisterCommand, RegisterHandler,
};

#[derive(Clone)]
pub struct AuthHandlers {
    register_handler: Arc<RegisterHandler>,
    login_handler: Arc<LoginHandler>,
    google_handler: Arc<GoogleSignInHandler>,
    current_user_handler: Arc<CurrentUserHandler>,
}

impl AuthHandlers {
    pub fn new(state: &AppState) -> Self {
        Self {
            register_handler: Arc::new(RegisterHandler::new(
                state.users.clone(),
                state.token_issuer.clone(),
            )),
            login_handler: Arc::new(LoginHandler::new(
                state.users.clone(),
                state.token_issuer.clone(),
            )),
            google_handler: Arc::new(GoogleSignInHandler::new(
                state.users.clone(),
                state.token_issuer.clone(),
                state.identity_verifier.clone(),
            )),
            current_user_handler: Arc::new(CurrentUserHandler::new(state.users.clone())),
        }
    }
}

/// POST /api/auth/register
pub async fn register(
    State(handlers): State<AuthHandlers>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(req) = payload?;
    let signed_in = handlers
        .register_handler
        .handle(RegisterCommand {
            email: req.email,
            password: req.password,
            full_name: req.full_name,
        })
        .await?;
    Ok(Json(signed_in.into()))
}

/// POST /api/auth/login
pub async fn login(
    State(handlers): State<AuthHandlers>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(req) = payload?;
    let signed_in = handlers
        .login_handler
        .handle(LoginCommand {
            email: req.email,
            password: req.password,
        })
        .await?;
    Ok(Json(signed_in.into()))
}

/// POST /api/auth/google
pub async fn google_sign_in(
    State(handlers): State<AuthHandlers>,
    payload: Result<Json<GoogleAuthRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(req) = payload?;
    let signed_in = handlers
        .google_handler
        .handle(GoogleSignInCommand {
            credential: req.credential,
        })
        .await?;
    Ok(Json(signed_in.into()))
}

/// GET /api/auth/me
pub async fn me(
    State(handlers): State<AuthHandlers>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<UserResponse>, ApiError> {
    let user = handlers.current_user_handler.handle(&user.id).await?;
    Ok(Json(UserResponse::from(&user)))
}

/// POST /api/auth/logout - tokens are stateless; the client drops its copy.
pub async fn logout(RequireAuth(_user): RequireAuth) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Successfully logged out",
    })
}
