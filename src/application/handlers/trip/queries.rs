//! Trip queries.

use std::sync::Arc;

use super::{load_owned_trip, trip_not_found};
use crate::domain::foundation::{DomainError, ShareId, TripId, UserId};
use crate::domain::trip::Trip;
use crate::ports::TripRepository;

pub struct GetTripHandler {
    trips: Arc<dyn TripRepository>,
}

impl GetTripHandler {
    pub fn new(trips: Arc<dyn TripRepository>) -> Self {
        Self { trips }
    }

    pub async fn handle(&self, owner: &UserId, trip_id: &TripId) -> Result<Trip, DomainError> {
        load_owned_trip(self.trips.as_ref(), trip_id, owner).await
    }
}

/// Owner's trips, most recently updated first.
pub struct ListTripsHandler {
    trips: Arc<dyn TripRepository>,
}

impl ListTripsHandler {
    pub fn new(trips: Arc<dyn TripRepository>) -> Self {
        Self { trips }
    }

    pub async fn handle(&self, owner: &UserId) -> Result<Vec<Trip>, DomainError> {
        self.trips.list_by_owner(owner).await
    }
}

/// Public lookup by share id. No authentication.
pub struct GetSharedTripHandler {
    trips: Arc<dyn TripRepository>,
}

impl GetSharedTripHandler {
    pub fn new(trips: Arc<dyn TripRepository>) -> Self {
        Self { trips }
    }

    pub async fn handle(&self, share_id: &str) -> Result<Trip, DomainError> {
        let share_id = ShareId::parse(share_id).map_err(|_| trip_not_found())?;
        self.trips
            .find_by_share_id(&share_id)
            .await?
            .ok_or_else(trip_not_found)
    }
}
