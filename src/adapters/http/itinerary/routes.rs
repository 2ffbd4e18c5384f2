//! HTTP routes for itinerary endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    generate_itinerary, get_itinerary, regenerate_itinerary, update_itinerary, ItineraryHandlers,
};

pub fn itinerary_routes(handlers: ItineraryHandlers) -> Router {
    Router::new()
        .route(
            "/:id/itinerary",
            get(get_itinerary)
                .post(generate_itinerary)
                .put(update_itinerary),
        )
        .route("/:id/itinerary/regenerate", post(regenerate_itinerary))
        .with_state(handlers)
}
