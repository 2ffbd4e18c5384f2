//! Trip module - the trip aggregate and its lifecycle status.

mod status;
mod trip;

pub use status::TripStatus;
pub use trip::{NewTrip, Trip, TripChanges, DEFAULT_CURRENCY};
