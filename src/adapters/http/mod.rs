//! HTTP adapters - REST API implementations.
//!
//! Each resource has its own adapter (dto / handlers / routes); [`router`]
//! nests them under `/api` and applies the shared middleware stack.

pub mod agent;
pub mod auth;
pub mod chat;
pub mod checklist;
pub mod copilotkit;
pub mod dto;
pub mod error;
pub mod itinerary;
pub mod middleware;
pub mod state;
pub mod trips;

use std::time::Duration;

use axum::{
    http::{HeaderName, HeaderValue},
    middleware::from_fn_with_state,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::ServerConfig;
use agent::{agent_routes, AgentHandlers};
use auth::{auth_routes, AuthHandlers};
use chat::{chat_routes, ChatHandlers};
use checklist::{checklist_routes, ChecklistHandlers};
use copilotkit::{copilotkit_routes, CopilotKitHandlers};
use itinerary::{itinerary_routes, ItineraryHandlers};
use middleware::auth_middleware;
use trips::{trip_routes, TripHandlers};

pub use error::{ApiError, ErrorResponse};
pub use state::AppState;

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Transport settings for the router.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Name reported by `GET /`.
    pub app_name: String,
    /// Applies until response headers are produced, not to streamed bodies.
    pub request_timeout: Duration,
    /// Allowed CORS origins; empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            app_name: "TripMate AI".to_string(),
            request_timeout: Duration::from_secs(60),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpSettings {
    pub fn from_config(server: &ServerConfig) -> Self {
        Self {
            app_name: server.app_name.clone(),
            request_timeout: server.request_timeout(),
            cors_origins: server.cors_origins_list(),
        }
    }
}

/// Builds the full application router.
pub fn router(state: AppState, settings: HttpSettings) -> Router {
    let trips = Router::new()
        .merge(trip_routes(TripHandlers::new(&state)))
        .merge(itinerary_routes(ItineraryHandlers::new(&state)))
        .merge(checklist_routes(ChecklistHandlers::new(&state)));

    let api = Router::new()
        .nest("/auth", auth_routes(AuthHandlers::new(&state)))
        .nest("/trips", trips)
        .nest("/chat", chat_routes(ChatHandlers::new(&state)))
        .nest("/agent", agent_routes(AgentHandlers::new(&state)))
        .nest("/copilotkit", copilotkit_routes(CopilotKitHandlers::new(&state)));

    let welcome = format!("Welcome to {} API", settings.app_name);

    Router::new()
        .route("/", get(move || root(welcome.clone())))
        .route("/health", get(health))
        .nest("/api", api)
        .layer(from_fn_with_state(
            state.session_validator.clone(),
            auth_middleware,
        ))
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(CompressionLayer::new())
        .layer(cors_layer(&settings.cors_origins))
        .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(allowed))
}

async fn root(message: String) -> Json<Value> {
    Json(json!({
        "message": message,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_layer_accepts_wildcard_and_explicit_origins() {
        let _ = cors_layer(&[]);
        let _ = cors_layer(&["http://localhost:3000".to_string(), "not a header\n".to_string()]);
    }

    #[test]
    fn settings_follow_server_config() {
        let server = ServerConfig {
            request_timeout_secs: 5,
            cors_origins: Some("http://a.test, http://b.test".to_string()),
            ..ServerConfig::default()
        };
        let settings = HttpSettings::from_config(&server);
        assert_eq!(settings.request_timeout, Duration::from_secs(5));
        assert_eq!(settings.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(settings.app_name, "TripMate AI");
    }
}
