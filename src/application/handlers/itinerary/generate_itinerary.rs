//! GenerateItineraryHandler - asks the model for a day-by-day plan.
//!
//! Generation never fails on the model side: when the call errors or the
//! reply carries no JSON document, an empty fallback plan is stored so the
//! client can retry with regenerate.

use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::application::handlers::trip::load_owned_trip;
use crate::domain::assistant::{itinerary_prompt, Transcript, TRAVEL_ASSISTANT_PERSONA};
use crate::domain::foundation::{DomainError, TripId, UserId};
use crate::domain::itinerary::{fallback_document, generation_request, Itinerary};
use crate::ports::{
    AIProvider, CompletionParams, CompletionRequest, ItineraryRepository, Message, TripRepository,
};

#[derive(Debug, Clone)]
pub struct GenerateItineraryCommand {
    pub owner: UserId,
    pub trip_id: TripId,
    /// Free-form preferences forwarded to the prompt.
    pub preferences: Option<Value>,
}

pub struct GenerateItineraryHandler {
    trips: Arc<dyn TripRepository>,
    itineraries: Arc<dyn ItineraryRepository>,
    ai_provider: Arc<dyn AIProvider>,
    params: CompletionParams,
}

impl GenerateItineraryHandler {
    pub fn new(
        trips: Arc<dyn TripRepository>,
        itineraries: Arc<dyn ItineraryRepository>,
        ai_provider: Arc<dyn AIProvider>,
        params: CompletionParams,
    ) -> Self {
        Self {
            trips,
            itineraries,
            ai_provider,
            params,
        }
    }

    /// Generates (or regenerates) the plan, bumping the version of an
    /// existing itinerary.
    pub async fn handle(&self, cmd: GenerateItineraryCommand) -> Result<Itinerary, DomainError> {
        let trip = load_owned_trip(self.trips.as_ref(), &cmd.trip_id, &cmd.owner).await?;

        let prompt = itinerary_prompt(&generation_request(&trip, cmd.preferences));
        let request = CompletionRequest::new(vec![
            Message::system(TRAVEL_ASSISTANT_PERSONA),
            Message::user(prompt),
        ])
        .with_params(self.params);

        let data = match self.ai_provider.complete(request).await {
            Ok(response) => {
                info!(
                    trip_id = %trip.id,
                    model = %response.model,
                    total_tokens = response.usage.total_tokens,
                    finish_reason = %response.finish_reason,
                    "Itinerary reply received"
                );
                match Transcript::from_text(response.content).payload {
                    Some(document) => document,
                    None => {
                        warn!(trip_id = %trip.id, "Itinerary reply had no JSON document");
                        fallback_document(&trip)
                    }
                }
            }
            Err(e) => {
                warn!(trip_id = %trip.id, error = %e, "Itinerary generation failed");
                fallback_document(&trip)
            }
        };

        let existing = self.itineraries.find_by_trip(&trip.id).await?;
        let itinerary = Itinerary::upsert(existing, trip.id, data);
        self.itineraries.upsert(&itinerary).await?;

        info!(trip_id = %trip.id, version = itinerary.version, "Itinerary stored");
        Ok(itinerary)
    }
}
