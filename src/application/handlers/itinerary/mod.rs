//! Itinerary handlers.

mod generate_itinerary;
mod get_itinerary;
mod update_itinerary;

pub use generate_itinerary::{GenerateItineraryCommand, GenerateItineraryHandler};
pub use get_itinerary::GetItineraryHandler;
pub use update_itinerary::{UpdateItineraryCommand, UpdateItineraryHandler};

use crate::domain::foundation::{DomainError, ErrorCode};

pub(crate) fn itinerary_not_found() -> DomainError {
    DomainError::not_found(ErrorCode::ItineraryNotFound, "Itinerary not found")
}
