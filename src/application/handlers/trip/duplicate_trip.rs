//! DuplicateTripHandler - copies a trip for the same owner.

use std::sync::Arc;

use super::load_owned_trip;
use crate::domain::foundation::{DomainError, TripId, UserId};
use crate::domain::trip::Trip;
use crate::ports::TripRepository;

pub struct DuplicateTripHandler {
    trips: Arc<dyn TripRepository>,
}

impl DuplicateTripHandler {
    pub fn new(trips: Arc<dyn TripRepository>) -> Self {
        Self { trips }
    }

    pub async fn handle(&self, owner: &UserId, trip_id: &TripId) -> Result<Trip, DomainError> {
        let original = load_owned_trip(self.trips.as_ref(), trip_id, owner).await?;
        let copy = original.duplicate();
        self.trips.save(&copy).await?;
        Ok(copy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryTripRepository;
    use crate::domain::trip::{NewTrip, TripStatus};

    #[tokio::test]
    async fn copy_is_a_fresh_unshared_draft() {
        let repo = InMemoryTripRepository::new();
        let mut new = NewTrip::named("Rome");
        new.status = TripStatus::Booked;
        let mut trip = Trip::create(UserId::new(), new).unwrap();
        trip.share();
        repo.save(&trip).await.unwrap();

        let copy = DuplicateTripHandler::new(Arc::new(repo.clone()))
            .handle(&trip.owner, &trip.id)
            .await
            .unwrap();

        assert_ne!(copy.id, trip.id);
        assert_eq!(copy.name, "Rome (Copy)");
        assert_eq!(copy.status, TripStatus::Draft);
        assert!(copy.share_id.is_none());
        assert_eq!(repo.list_by_owner(&trip.owner).await.unwrap().len(), 2);
    }
}
