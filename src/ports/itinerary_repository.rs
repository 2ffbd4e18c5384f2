//! Itinerary repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, TripId};
use crate::domain::itinerary::Itinerary;

/// Persistence for the single itinerary of each trip.
#[async_trait]
pub trait ItineraryRepository: Send + Sync {
    async fn find_by_trip(&self, trip_id: &TripId) -> Result<Option<Itinerary>, DomainError>;

    /// Insert or replace the itinerary for its trip.
    async fn upsert(&self, itinerary: &Itinerary) -> Result<(), DomainError>;
}
