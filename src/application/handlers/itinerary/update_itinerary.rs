//! UpdateItineraryHandler - client edits of an existing plan.

use serde_json::Value;
use std::sync::Arc;

use super::itinerary_not_found;
use crate::application::handlers::trip::load_owned_trip;
use crate::domain::foundation::{DomainError, TripId, UserId};
use crate::domain::itinerary::Itinerary;
use crate::ports::{ItineraryRepository, TripRepository};

#[derive(Debug, Clone)]
pub struct UpdateItineraryCommand {
    pub owner: UserId,
    pub trip_id: TripId,
    pub data: Value,
}

pub struct UpdateItineraryHandler {
    trips: Arc<dyn TripRepository>,
    itineraries: Arc<dyn ItineraryRepository>,
}

impl UpdateItineraryHandler {
    pub fn new(trips: Arc<dyn TripRepository>, itineraries: Arc<dyn ItineraryRepository>) -> Self {
        Self { trips, itineraries }
    }

    pub async fn handle(&self, cmd: UpdateItineraryCommand) -> Result<Itinerary, DomainError> {
        let trip = load_owned_trip(self.trips.as_ref(), &cmd.trip_id, &cmd.owner).await?;
        let mut itinerary = self
            .itineraries
            .find_by_trip(&trip.id)
            .await?
            .ok_or_else(itinerary_not_found)?;
        itinerary.revise(cmd.data);
        self.itineraries.upsert(&itinerary).await?;
        Ok(itinerary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryItineraryRepository, InMemoryTripRepository};
    use crate::domain::foundation::ErrorCode;
    use crate::domain::trip::{NewTrip, Trip};
    use serde_json::json;

    #[tokio::test]
    async fn edit_bumps_version_and_requires_existing_plan() {
        let trips = Arc::new(InMemoryTripRepository::new());
        let itineraries = Arc::new(InMemoryItineraryRepository::new());
        let trip = Trip::create(UserId::new(), NewTrip::named("Lyon")).unwrap();
        trips.save(&trip).await.unwrap();
        let handler = UpdateItineraryHandler::new(trips, itineraries.clone());
        let cmd = UpdateItineraryCommand {
            owner: trip.owner,
            trip_id: trip.id,
            data: json!({"days": [{"day": 1}]}),
        };

        let err = handler.handle(cmd.clone()).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ItineraryNotFound);

        itineraries
            .upsert(&Itinerary::new(trip.id, json!({"days": []})))
            .await
            .unwrap();
        let updated = handler.handle(cmd).await.unwrap();
        assert_eq!(updated.version, 2);
        assert_eq!(
            itineraries.find_by_trip(&trip.id).await.unwrap().unwrap().data,
            json!({"days": [{"day": 1}]})
        );
    }
}
