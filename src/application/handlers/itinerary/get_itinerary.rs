//! GetItineraryHandler

use std::sync::Arc;

use super::itinerary_not_found;
use crate::application::handlers::trip::load_owned_trip;
use crate::domain::foundation::{DomainError, TripId, UserId};
use crate::domain::itinerary::Itinerary;
use crate::ports::{ItineraryRepository, TripRepository};

pub struct GetItineraryHandler {
    trips: Arc<dyn TripRepository>,
    itineraries: Arc<dyn ItineraryRepository>,
}

impl GetItineraryHandler {
    pub fn new(trips: Arc<dyn TripRepository>, itineraries: Arc<dyn ItineraryRepository>) -> Self {
        Self { trips, itineraries }
    }

    pub async fn handle(&self, owner: &UserId, trip_id: &TripId) -> Result<Itinerary, DomainError> {
        let trip = load_owned_trip(self.trips.as_ref(), trip_id, owner).await?;
        self.itineraries
            .find_by_trip(&trip.id)
            .await?
            .ok_or_else(itinerary_not_found)
    }
}
