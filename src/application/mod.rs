//! Application layer - commands, queries and handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::assistant::{
    AgentRunner, AgentTurnCommand, CopilotReply, CopilotTurnCommand, CopilotTurnHandler,
    PreparedTurn, RunOutcome,
};
