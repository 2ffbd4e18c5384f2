//! DeleteTripHandler

use std::sync::Arc;
use tracing::info;

use super::load_owned_trip;
use crate::domain::foundation::{DomainError, TripId, UserId};
use crate::ports::TripRepository;

pub struct DeleteTripHandler {
    trips: Arc<dyn TripRepository>,
}

impl DeleteTripHandler {
    pub fn new(trips: Arc<dyn TripRepository>) -> Self {
        Self { trips }
    }

    pub async fn handle(&self, owner: &UserId, trip_id: &TripId) -> Result<(), DomainError> {
        let trip = load_owned_trip(self.trips.as_ref(), trip_id, owner).await?;
        self.trips.delete(&trip.id).await?;
        info!(trip_id = %trip.id, "Trip deleted");
        Ok(())
    }
}
