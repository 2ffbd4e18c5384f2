//! HTTP handlers for trip endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use super::dto::{
    CreateTripRequest, ShareTripResponse, TripResponse, UpdateTripRequest,
};
use crate::adapters::http::dto::MessageResponse;
use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::trip::{
    CreateTripCommand, CreateTripHandler, DeleteTripHandler, DuplicateTripHandler,
    GetSharedTripHandler, GetTripHandler, ListTripsHandler, ShareTripHandler, UpdateTripCommand,
    UpdateTripHandler,
};
use crate::domain::foundation::TripId;

#[derive(Clone)]
pub struct TripHandlers {
    create_handler: Arc<CreateTripHandler>,
    update_handler: Arc<UpdateTripHandler>,
    delete_handler: Arc<DeleteTripHandler>,
    duplicate_handler: Arc<DuplicateTripHandler>,
    share_handler: Arc<ShareTripHandler>,
    get_handler: Arc<GetTripHandler>,
    list_handler: Arc<ListTripsHandler>,
    shared_handler: Arc<GetSharedTripHandler>,
}

impl TripHandlers {
    pub fn new(state: &AppState) -> Self {
        let trips = &state.trips;
        Self {
            create_handler: Arc::new(CreateTripHandler::new(trips.clone())),
            update_handler: Arc::new(UpdateTripHandler::new(trips.clone())),
            delete_handler: Arc::new(DeleteTripHandler::new(trips.clone())),
            duplicate_handler: Arc::new(DuplicateTripHandler::new(trips.clone())),
            share_handler: Arc::new(ShareTripHandler::new(trips.clone())),
            get_handler: Arc::new(GetTripHandler::new(trips.clone())),
            list_handler: Arc::new(ListTripsHandler::new(trips.clone())),
            shared_handler: Arc::new(GetSharedTripHandler::new(trips.clone())),
        }
    }
}

/// GET /api/trips
pub async fn list_trips(
    State(handlers): State<TripHandlers>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<TripResponse>>, ApiError> {
    let trips = handlers.list_handler.handle(&user.id).await?;
    Ok(Json(trips.into_iter().map(TripResponse::from).collect()))
}

/// POST /api/trips
pub async fn create_trip(
    State(handlers): State<TripHandlers>,
    RequireAuth(user): RequireAuth,
    payload: Result<Json<CreateTripRequest>, JsonRejection>,
) -> Result<Json<TripResponse>, ApiError> {
    let Json(req) = payload?;
    let trip = handlers
        .create_handler
        .handle(CreateTripCommand {
            owner: user.id,
            trip: req.into(),
        })
        .await?;
    Ok(Json(trip.into()))
}

/// GET /api/trips/:id
pub async fn get_trip(
    State(handlers): State<TripHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
) -> Result<Json<TripResponse>, ApiError> {
    let trip_id: TripId = parse_id(&trip_id, "trip")?;
    let trip = handlers.get_handler.handle(&user.id, &trip_id).await?;
    Ok(Json(trip.into()))
}

/// PUT /api/trips/:id
pub async fn update_trip(
    State(handlers): State<TripHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
    payload: Result<Json<UpdateTripRequest>, JsonRejection>,
) -> Result<Json<TripResponse>, ApiError> {
    let trip_id: TripId = parse_id(&trip_id, "trip")?;
    let Json(req) = payload?;
    let trip = handlers
        .update_handler
        .handle(UpdateTripCommand {
            owner: user.id,
            trip_id,
            changes: req.into(),
        })
        .await?;
    Ok(Json(trip.into()))
}

/// DELETE /api/trips/:id
pub async fn delete_trip(
    State(handlers): State<TripHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let trip_id: TripId = parse_id(&trip_id, "trip")?;
    handlers.delete_handler.handle(&user.id, &trip_id).await?;
    Ok(Json(MessageResponse {
        message: "Trip deleted successfully",
    }))
}

/// POST /api/trips/:id/duplicate
pub async fn duplicate_trip(
    State(handlers): State<TripHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
) -> Result<Json<TripResponse>, ApiError> {
    let trip_id: TripId = parse_id(&trip_id, "trip")?;
    let copy = handlers.duplicate_handler.handle(&user.id, &trip_id).await?;
    Ok(Json(copy.into()))
}

/// POST /api/trips/:id/share
pub async fn share_trip(
    State(handlers): State<TripHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
) -> Result<Json<ShareTripResponse>, ApiError> {
    let trip_id: TripId = parse_id(&trip_id, "trip")?;
    let shared = handlers.share_handler.handle(&user.id, &trip_id).await?;
    Ok(Json(shared.into()))
}

/// GET /api/trips/shared/:share_id - public
pub async fn get_shared_trip(
    State(handlers): State<TripHandlers>,
    Path(share_id): Path<String>,
) -> Result<Json<TripResponse>, ApiError> {
    let trip = handlers.shared_handler.handle(&share_id).await?;
    Ok(Json(trip.into()))
}
