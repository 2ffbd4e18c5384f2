//! HTTP routes for trip endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_trip, delete_trip, duplicate_trip, get_shared_trip, get_trip, list_trips, share_trip,
    update_trip, TripHandlers,
};

pub fn trip_routes(handlers: TripHandlers) -> Router {
    Router::new()
        .route("/", get(list_trips).post(create_trip))
        .route("/shared/:share_id", get(get_shared_trip))
        .route("/:id", get(get_trip).put(update_trip).delete(delete_trip))
        .route("/:id/duplicate", post(duplicate_trip))
        .route("/:id/share", post(share_trip))
        .with_state(handlers)
}
