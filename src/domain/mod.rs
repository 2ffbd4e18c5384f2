//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, errors, timestamps, auth)
//! - `assistant` - Streaming turn protocol, context assembly, payload extraction
//! - `user` - Accounts and credentials
//! - `trip` - Trip aggregate
//! - `itinerary` - Versioned trip plans
//! - `checklist` - Packing items and todos
//! - `chat` - Persisted chat transcripts

pub mod assistant;
pub mod chat;
pub mod checklist;
pub mod foundation;
pub mod itinerary;
pub mod trip;
pub mod user;
