//! HTTP handlers for chat endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use super::dto::{ChatRequest, ChatResponse, ChatSessionResponse};
use crate::adapters::http::dto::MessageResponse;
use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::chat::{
    DeleteChatSessionHandler, GetChatSessionHandler, ListChatSessionsHandler,
    SendChatMessageCommand, SendChatMessageHandler,
};
use crate::domain::foundation::ChatSessionId;

#[derive(Clone)]
pub struct ChatHandlers {
    send_handler: Arc<SendChatMessageHandler>,
    list_handler: Arc<ListChatSessionsHandler>,
    get_handler: Arc<GetChatSessionHandler>,
    delete_handler: Arc<DeleteChatSessionHandler>,
}

impl ChatHandlers {
    pub fn new(state: &AppState) -> Self {
        let chats = &state.chats;
        Self {
            send_handler: Arc::new(SendChatMessageHandler::new(
                chats.clone(),
                state.ai_provider.clone(),
                state.completion,
            )),
            list_handler: Arc::new(ListChatSessionsHandler::new(chats.clone())),
            get_handler: Arc::new(GetChatSessionHandler::new(chats.clone())),
            delete_handler: Arc::new(DeleteChatSessionHandler::new(chats.clone())),
        }
    }
}

/// POST /api/chat
pub async fn send_message(
    State(handlers): State<ChatHandlers>,
    RequireAuth(user): RequireAuth,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = payload?;
    let session_id = req
        .session_id
        .as_deref()
        .map(|raw| parse_id::<ChatSessionId>(raw, "session"))
        .transpose()?;

    let result = handlers
        .send_handler
        .handle(SendChatMessageCommand {
            user_id: user.id,
            message: req.message,
            session_id,
            trip_context: req.trip_context,
        })
        .await?;
    Ok(Json(result.into()))
}

/// GET /api/chat/sessions
pub async fn list_sessions(
    State(handlers): State<ChatHandlers>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<ChatSessionResponse>>, ApiError> {
    let sessions = handlers.list_handler.handle(&user.id).await?;
    Ok(Json(
        sessions.into_iter().map(ChatSessionResponse::from).collect(),
    ))
}

/// GET /api/chat/sessions/:id
pub async fn get_session(
    State(handlers): State<ChatHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
) -> Result<Json<ChatSessionResponse>, ApiError> {
    let session_id: ChatSessionId = parse_id(&session_id, "session")?;
    let view = handlers.get_handler.handle(&user.id, &session_id).await?;
    Ok(Json(view.into()))
}

/// DELETE /api/chat/sessions/:id
pub async fn delete_session(
    State(handlers): State<ChatHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let session_id: ChatSessionId = parse_id(&session_id, "session")?;
    handlers.delete_handler.handle(&user.id, &session_id).await?;
    Ok(Json(MessageResponse::new("Session deleted successfully")))
}
