//! HTTP adapter for the AG-UI agent endpoint.
//!
//! `POST /api/agent` answers with a `text/event-stream` body carrying one
//! `data: {json}` frame per protocol event. The run executes on its own
//! task and feeds a bounded channel, so a slow client applies
//! backpressure to the upstream model stream and a vanished client ends
//! the run at the next send.

mod dto;
mod handlers;
mod routes;

pub use dto::{agent_descriptor, AgentRequest};
pub use handlers::AgentHandlers;
pub use routes::agent_routes;
