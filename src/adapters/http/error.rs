//! HTTP error mapping.
//!
//! Every failure leaves the API as `{ "code": "...", "message": "..." }`
//! with a status derived from the domain `ErrorCode`.

use std::collections::HashMap;
use std::str::FromStr;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::domain::assistant::ContextError;
use crate::domain::foundation::{DomainError, ErrorCode};

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub details: HashMap<String, String>,
}

/// Handler error; wraps a `DomainError`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(DomainError::new(ErrorCode::ValidationFailed, message))
    }

    pub fn status(&self) -> StatusCode {
        status_for(self.0.code)
    }
}

pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::InvalidFormat
        | ErrorCode::EmailAlreadyRegistered => StatusCode::BAD_REQUEST,
        ErrorCode::UserNotFound
        | ErrorCode::TripNotFound
        | ErrorCode::ItineraryNotFound
        | ErrorCode::ChatSessionNotFound
        | ErrorCode::PackingItemNotFound
        | ErrorCode::TodoNotFound => StatusCode::NOT_FOUND,
        ErrorCode::InvalidCredentials | ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::AIProviderError | ErrorCode::IdentityProviderError => StatusCode::BAD_GATEWAY,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let DomainError {
            code,
            message,
            details,
        } = self.0;

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(code = %code, error = %message, "Request failed");
            "Internal server error".to_string()
        } else {
            message
        };

        let body = ErrorResponse {
            code: code.to_string(),
            message,
            details,
        };
        (status, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<ContextError> for ApiError {
    fn from(err: ContextError) -> Self {
        Self(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

/// Parses a path identifier, rejecting malformed ids with 400.
pub fn parse_id<T: FromStr>(raw: &str, what: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid {} id", what)))
}
