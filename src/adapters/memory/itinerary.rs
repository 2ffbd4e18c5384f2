use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, TripId};
use crate::domain::itinerary::Itinerary;
use crate::ports::ItineraryRepository;

#[derive(Debug, Default, Clone)]
pub struct InMemoryItineraryRepository {
    by_trip: Arc<RwLock<HashMap<TripId, Itinerary>>>,
}

impl InMemoryItineraryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItineraryRepository for InMemoryItineraryRepository {
    async fn find_by_trip(&self, trip_id: &TripId) -> Result<Option<Itinerary>, DomainError> {
        Ok(self.by_trip.read().await.get(trip_id).cloned())
    }

    async fn upsert(&self, itinerary: &Itinerary) -> Result<(), DomainError> {
        self.by_trip
            .write()
            .await
            .insert(itinerary.trip_id, itinerary.clone());
        Ok(())
    }
}
