//! HTTP adapter for the non-streaming chat endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ChatMessageResponse, ChatRequest, ChatResponse, ChatSessionResponse};
pub use handlers::ChatHandlers;
pub use routes::chat_routes;
