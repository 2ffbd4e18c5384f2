//! HTTP handlers for itinerary endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;

use super::dto::{GenerateItineraryRequest, ItineraryResponse, UpdateItineraryRequest};
use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::itinerary::{
    GenerateItineraryCommand, GenerateItineraryHandler, GetItineraryHandler,
    UpdateItineraryCommand, UpdateItineraryHandler,
};
use crate::domain::foundation::{TripId, UserId};

#[derive(Clone)]
pub struct ItineraryHandlers {
    get_handler: Arc<GetItineraryHandler>,
    generate_handler: Arc<GenerateItineraryHandler>,
    update_handler: Arc<UpdateItineraryHandler>,
}

impl ItineraryHandlers {
    pub fn new(state: &AppState) -> Self {
        Self {
            get_handler: Arc::new(GetItineraryHandler::new(
                state.trips.clone(),
                state.itineraries.clone(),
            )),
            generate_handler: Arc::new(GenerateItineraryHandler::new(
                state.trips.clone(),
                state.itineraries.clone(),
                state.ai_provider.clone(),
                state.completion,
            )),
            update_handler: Arc::new(UpdateItineraryHandler::new(
                state.trips.clone(),
                state.itineraries.clone(),
            )),
        }
    }

    async fn generate(
        &self,
        owner: UserId,
        raw_trip_id: &str,
        preferences: Option<Value>,
    ) -> Result<Json<ItineraryResponse>, ApiError> {
        let trip_id: TripId = parse_id(raw_trip_id, "trip")?;
        let itinerary = self
            .generate_handler
            .handle(GenerateItineraryCommand {
                owner,
                trip_id,
                preferences,
            })
            .await?;
        Ok(Json(itinerary.into()))
    }
}

/// GET /api/trips/:id/itinerary
pub async fn get_itinerary(
    State(handlers): State<ItineraryHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
) -> Result<Json<ItineraryResponse>, ApiError> {
    let trip_id: TripId = parse_id(&trip_id, "trip")?;
    let itinerary = handlers.get_handler.handle(&user.id, &trip_id).await?;
    Ok(Json(itinerary.into()))
}

/// POST /api/trips/:id/itinerary - body `{preferences?}` is optional.
pub async fn generate_itinerary(
    State(handlers): State<ItineraryHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
    payload: Option<Json<GenerateItineraryRequest>>,
) -> Result<Json<ItineraryResponse>, ApiError> {
    let preferences = payload.and_then(|Json(req)| req.preferences);
    handlers.generate(user.id, &trip_id, preferences).await
}

/// POST /api/trips/:id/itinerary/regenerate - the body is the preferences object.
pub async fn regenerate_itinerary(
    State(handlers): State<ItineraryHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
    payload: Option<Json<Value>>,
) -> Result<Json<ItineraryResponse>, ApiError> {
    let preferences = payload
        .map(|Json(value)| value)
        .filter(|value| !value.is_null());
    handlers.generate(user.id, &trip_id, preferences).await
}

/// PUT /api/trips/:id/itinerary
pub async fn update_itinerary(
    State(handlers): State<ItineraryHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
    payload: Result<Json<UpdateItineraryRequest>, JsonRejection>,
) -> Result<Json<ItineraryResponse>, ApiError> {
    let trip_id: TripId = parse_id(&trip_id, "trip")?;
    let Json(req) = payload?;
    let itinerary = handlers
        .update_handler
        .handle(UpdateItineraryCommand {
            owner: user.id,
            trip_id,
            data: req.data,
        })
        .await?;
    Ok(Json(itinerary.into()))
}
