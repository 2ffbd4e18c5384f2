//! Ports - interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Assistant
//!
//! - `AIProvider` - hosted language model (single and streaming completion)
//! - `EventSink` - ordered destination for stream events
//!
//! ## Persistence
//!
//! - `UserRepository`, `TripRepository`, `ItineraryRepository`
//! - `PackingRepository`, `TodoRepository`, `ChatRepository`
//!
//! ## Identity
//!
//! - `SessionValidator` / `TokenIssuer` - bearer access tokens
//! - `IdentityVerifier` - third-party ID tokens (Google)

mod ai_provider;
mod chat_repository;
mod checklist_repository;
mod event_sink;
mod identity_verifier;
mod itinerary_repository;
mod session_validator;
mod trip_repository;
mod user_repository;

pub use ai_provider::{
    AIError, AIProvider, CompletionParams, CompletionRequest, CompletionResponse,
    CompletionStream, FinishReason, Message, MessageRole, StreamChunk, TokenUsage,
};
pub use chat_repository::ChatRepository;
pub use checklist_repository::{PackingRepository, TodoRepository};
pub use event_sink::{EventSink, SinkClosed};
pub use identity_verifier::{IdentityError, IdentityVerifier, VerifiedIdentity};
pub use itinerary_repository::ItineraryRepository;
pub use session_validator::{IssuedToken, SessionValidator, TokenIssuer};
pub use trip_repository::TripRepository;
pub use user_repository::UserRepository;
