//! Access-token ports.
//!
//! `TokenIssuer` mints bearer tokens after a successful sign-in and
//! `SessionValidator` turns a bearer token back into an
//! [`AuthenticatedUser`]. One adapter usually implements both.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
///
/// # Contract
///
/// - `AuthError::InvalidToken` for malformed or badly signed tokens
/// - `AuthError::TokenExpired` for expired tokens
/// - `AuthError::ServiceUnavailable` for transient failures
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token (without the `Bearer ` prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// A freshly minted access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in_secs: u64,
}

/// Mints access tokens for authenticated users.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: &AuthenticatedUser) -> Result<IssuedToken, AuthError>;
}
