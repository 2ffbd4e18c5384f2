//! ShareTripHandler - mints (once) the public share id of a trip.

use std::sync::Arc;

use super::load_owned_trip;
use crate::domain::foundation::{DomainError, ShareId, TripId, UserId};
use crate::ports::TripRepository;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareTripResult {
    pub share_id: ShareId,
    pub share_url: String,
}

pub struct ShareTripHandler {
    trips: Arc<dyn TripRepository>,
}

impl ShareTripHandler {
    pub fn new(trips: Arc<dyn TripRepository>) -> Self {
        Self { trips }
    }

    /// Repeated calls return the same share id.
    pub async fn handle(
        &self,
        owner: &UserId,
        trip_id: &TripId,
    ) -> Result<ShareTripResult, DomainError> {
        let mut trip = load_owned_trip(self.trips.as_ref(), trip_id, owner).await?;
        let already_shared = trip.share_id.is_some();
        let share_id = trip.share().clone();
        if !already_shared {
            self.trips.update(&trip).await?;
        }

        Ok(ShareTripResult {
            share_url: format!("/shared/{}", share_id),
            share_id,
        })
    }
}
