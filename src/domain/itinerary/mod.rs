//! Itinerary module - the versioned day-by-day plan attached to a trip.
//!
//! The plan itself is a free-form JSON document produced by the assistant
//! or edited by the client; only its envelope is modelled here.

use serde_json::{json, Value};

use crate::domain::assistant::ItineraryRequest;
use crate::domain::foundation::{ItineraryId, Timestamp, TripId};
use crate::domain::trip::Trip;

pub const FALLBACK_NOTE: &str = "Unable to generate itinerary automatically. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub id: ItineraryId,
    pub trip_id: TripId,
    pub data: Value,
    pub version: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Itinerary {
    pub fn new(trip_id: TripId, data: Value) -> Self {
        let now = Timestamp::now();
        Self {
            id: ItineraryId::new(),
            trip_id,
            data,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the plan and bumps the version.
    pub fn revise(&mut self, data: Value) {
        self.data = data;
        self.version += 1;
        self.updated_at = Timestamp::now();
    }

    /// Creates the itinerary or revises the existing one.
    pub fn upsert(existing: Option<Itinerary>, trip_id: TripId, data: Value) -> Self {
        match existing {
            Some(mut itinerary) => {
                itinerary.revise(data);
                itinerary
            }
            None => Itinerary::new(trip_id, data),
        }
    }
}

/// Trip facts for the generation prompt.
pub fn generation_request(trip: &Trip, preferences: Option<Value>) -> ItineraryRequest {
    ItineraryRequest {
        destination: trip.destination.clone(),
        start_date: trip.start_date.map(|d| d.to_string()),
        end_date: trip.end_date.map(|d| d.to_string()),
        travelers: trip.travelers,
        budget: trip.budget,
        currency: trip.currency.clone(),
        notes: trip.notes.clone(),
        preferences,
    }
}

/// Empty plan stored when the model output has no usable JSON.
pub fn fallback_document(trip: &Trip) -> Value {
    json!({
        "destination": trip.destination,
        "start_date": trip.start_date.map(|d| d.to_string()),
        "end_date": trip.end_date.map(|d| d.to_string()),
        "days": [],
        "total_estimated_cost": 0,
        "notes": [FALLBACK_NOTE],
    })
}
