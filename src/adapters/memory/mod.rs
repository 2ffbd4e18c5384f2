//! In-memory repository implementations.
//!
//! Used by tests and by `memory://` development runs. Data lives for the
//! lifetime of the process and is not shared between instances.

mod chat;
mod checklist;
mod itinerary;
mod trip;
mod user;

pub use chat::InMemoryChatRepository;
pub use checklist::{InMemoryPackingRepository, InMemoryTodoRepository};
pub use itinerary::InMemoryItineraryRepository;
pub use trip::InMemoryTripRepository;
pub use user::InMemoryUserRepository;
