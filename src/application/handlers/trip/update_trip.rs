//! UpdateTripHandler - partial trip updates.

use std::sync::Arc;

use super::load_owned_trip;
use crate::domain::foundation::{DomainError, TripId, UserId};
use crate::domain::trip::{Trip, TripChanges};
use crate::ports::TripRepository;

#[derive(Debug, Clone)]
pub struct UpdateTripCommand {
    pub owner: UserId,
    pub trip_id: TripId,
    pub changes: TripChanges,
}

pub struct UpdateTripHandler {
    trips: Arc<dyn TripRepository>,
}

impl UpdateTripHandler {
    pub fn new(trips: Arc<dyn TripRepository>) -> Self {
        Self { trips }
    }

    pub async fn handle(&self, cmd: UpdateTripCommand) -> Result<Trip, DomainError> {
        let mut trip = load_owned_trip(self.trips.as_ref(), &cmd.trip_id, &cmd.owner).await?;
        trip.apply(cmd.changes)?;
        self.trips.update(&trip).await?;
        Ok(trip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryTripRepository;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::trip::{NewTrip, TripStatus};

    async fn seeded() -> (InMemoryTripRepository, Trip) {
        let repo = InMemoryTripRepository::new();
        let trip = Trip::create(UserId::new(), NewTrip::named("Kyoto")).unwrap();
        repo.save(&trip).await.unwrap();
        (repo, trip)
    }

    #[tokio::test]
    async fn applies_changes() {
        let (repo, trip) = seeded().await;
        let handler = UpdateTripHandler::new(Arc::new(repo.clone()));

        let updated = handler
            .handle(UpdateTripCommand {
                owner: trip.owner,
                trip_id: trip.id,
                changes: TripChanges {
                    status: Some(TripStatus::Planned),
                    travelers: Some(3),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(updated.status, TripStatus::Planned);
        assert_eq!(repo.find_by_id(&trip.id).await.unwrap().unwrap().travelers, 3);
    }

    #[tokio::test]
    async fn other_owner_gets_not_found() {
        let (repo, trip) = seeded().await;
        let handler = UpdateTripHandler::new(Arc::new(repo));

        let err = handler
            .handle(UpdateTripCommand {
                owner: UserId::new(),
                trip_id: trip.id,
                changes: TripChanges::default(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::TripNotFound);
    }
}
