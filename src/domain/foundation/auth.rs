//! Authentication types for the domain layer.
//!
//! `AuthenticatedUser` is what the HTTP middleware injects into request
//! extensions after a bearer token has been validated through the
//! `SessionValidator` port. It carries no token-library types.

use super::UserId;
use thiserror::Error;

/// Caller identity recovered from a validated access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: impl Into<String>, full_name: Option<String>) -> Self {
        Self {
            id,
            email: email.into(),
            full_name,
        }
    }

    /// Returns the user's name, or email as fallback.
    pub fn display_name_or_email(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.email)
    }
}

/// Token validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Missing, malformed, or badly signed token.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// Token is valid but the account no longer exists.
    #[error("User not found")]
    UserNotFound,

    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// True when the client should obtain a new token.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::UserNotFound
        )
    }
}
