//! HTTP adapter for itinerary endpoints (nested under `/api/trips`).

mod dto;
mod handlers;
mod routes;

pub use dto::{GenerateItineraryRequest, ItineraryResponse, UpdateItineraryRequest};
pub use handlers::ItineraryHandlers;
pub use routes::itinerary_routes;
