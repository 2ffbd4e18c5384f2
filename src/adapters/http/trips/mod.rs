//! HTTP adapter for trip endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateTripRequest, ShareTripResponse, TripResponse, UpdateTripRequest};
pub use handlers::TripHandlers;
pub use routes::trip_routes;
