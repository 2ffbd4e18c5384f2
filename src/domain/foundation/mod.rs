//! Foundation module - shared domain primitives.
//!
//! Identifiers, timestamps, error types and the authenticated-user value
//! that the rest of the TripMate domain is written in terms of.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    ChatMessageId, ChatSessionId, ItineraryId, PackingItemId, ShareId, TodoId, TripId, UserId,
};
pub use timestamp::Timestamp;
