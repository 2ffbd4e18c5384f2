//! CreateTripHandler - command handler for new trips.

use std::sync::Arc;
use tracing::info;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::trip::{NewTrip, Trip};
use crate::ports::TripRepository;

#[derive(Debug, Clone)]
pub struct CreateTripCommand {
    pub owner: UserId,
    pub trip: NewTrip,
}

pub struct CreateTripHandler {
    trips: Arc<dyn TripRepository>,
}

impl CreateTripHandler {
    pub fn new(trips: Arc<dyn TripRepository>) -> Self {
        Self { trips }
    }

    pub async fn handle(&self, cmd: CreateTripCommand) -> Result<Trip, DomainError> {
        let trip = Trip::create(cmd.owner, cmd.trip)?;
        self.trips.save(&trip).await?;
        info!(trip_id = %trip.id, owner = %trip.owner, "Trip created");
        Ok(trip)
    }
}
