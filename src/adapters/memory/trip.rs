use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ShareId, TripId, UserId};
use crate::domain::trip::Trip;
use crate::ports::TripRepository;

#[derive(Debug, Default, Clone)]
pub struct InMemoryTripRepository {
    trips: Arc<RwLock<HashMap<TripId, Trip>>>,
}

impl InMemoryTripRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn trip_not_found() -> DomainError {
    DomainError::not_found(ErrorCode::TripNotFound, "Trip not found")
}

#[async_trait]
impl TripRepository for InMemoryTripRepository {
    async fn save(&self, trip: &Trip) -> Result<(), DomainError> {
        self.trips.write().await.insert(trip.id, trip.clone());
        Ok(())
    }

    async fn update(&self, trip: &Trip) -> Result<(), DomainError> {
        let mut trips = self.trips.write().await;
        let existing = trips.get_mut(&trip.id).ok_or_else(trip_not_found)?;
        *existing = trip.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &TripId) -> Result<Option<Trip>, DomainError> {
        Ok(self.trips.read().await.get(id).cloned())
    }

    async fn find_by_share_id(&self, share_id: &ShareId) -> Result<Option<Trip>, DomainError> {
        Ok(self
            .trips
            .read()
            .await
            .values()
            .find(|t| t.share_id.as_ref() == Some(share_id))
            .cloned())
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Trip>, DomainError> {
        let mut trips: Vec<Trip> = self
            .trips
            .read()
            .await
            .values()
            .filter(|t| t.is_owned_by(owner))
            .cloned()
            .collect();
        trips.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(trips)
    }

    async fn delete(&self, id: &TripId) -> Result<(), DomainError> {
        self.trips
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(trip_not_found)
    }
}
