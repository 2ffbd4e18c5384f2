//! HTTP adapter for the CopilotKit remote endpoint.
//!
//! `POST /api/copilotkit` answers with one complete reply framed as
//! CopilotKit stream events, always closed by `data: [DONE]`. The model
//! call runs lazily inside the response body, so it starts after the
//! headers are sent and stops if the client goes away.

mod dto;
mod handlers;
mod routes;

pub use dto::{copilot_actions_descriptor, CopilotFrame, CopilotRequest, DONE_FRAME};
pub use handlers::CopilotKitHandlers;
pub use routes::copilotkit_routes;
