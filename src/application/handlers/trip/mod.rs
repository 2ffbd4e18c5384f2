//! Trip handlers.
//!
//! Every operation on a trip id is owner-scoped: another user's trip is
//! reported as not found rather than forbidden.

mod create_trip;
mod delete_trip;
mod duplicate_trip;
mod queries;
mod share_trip;
mod update_trip;

pub use create_trip::{CreateTripCommand, CreateTripHandler};
pub use delete_trip::DeleteTripHandler;
pub use duplicate_trip::DuplicateTripHandler;
pub use queries::{GetSharedTripHandler, GetTripHandler, ListTripsHandler};
pub use share_trip::{ShareTripHandler, ShareTripResult};
pub use update_trip::{UpdateTripCommand, UpdateTripHandler};

use crate::domain::foundation::{DomainError, ErrorCode, TripId, UserId};
use crate::domain::trip::Trip;
use crate::ports::TripRepository;

pub(crate) fn trip_not_found() -> DomainError {
    DomainError::not_found(ErrorCode::TripNotFound, "Trip not found")
}

/// Loads a trip owned by `user_id`.
pub(crate) async fn load_owned_trip(
    trips: &dyn TripRepository,
    trip_id: &TripId,
    user_id: &UserId,
) -> Result<Trip, DomainError> {
    trips
        .find_by_id(trip_id)
        .await?
        .filter(|t| t.is_owned_by(user_id))
        .ok_or_else(trip_not_found)
}
