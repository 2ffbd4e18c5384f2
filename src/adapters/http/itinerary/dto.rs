//! HTTP DTOs for itinerary endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::Timestamp;
use crate::domain::itinerary::Itinerary;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateItineraryRequest {
    #[serde(default)]
    pub preferences: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateItineraryRequest {
    pub data: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItineraryResponse {
    pub id: String,
    pub trip_id: String,
    pub data: Value,
    pub version: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Itinerary> for ItineraryResponse {
    fn from(itinerary: Itinerary) -> Self {
        Self {
            id: itinerary.id.to_string(),
            trip_id: itinerary.trip_id.to_string(),
            data: itinerary.data,
            version: itinerary.version,
            created_at: itinerary.created_at,
            updated_at: itinerary.updated_at,
        }
    }
}
