//! External identity verification port (Google sign-in).

use async_trait::async_trait;
use thiserror::Error;

/// Claims of a verified third-party ID token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    /// Provider-stable subject identifier.
    pub subject: String,
    pub email: String,
    pub email_verified: bool,
    pub name: Option<String>,
    pub picture: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("Invalid identity token")]
    InvalidToken,

    #[error("Identity token was issued for another application")]
    AudienceMismatch,

    #[error("Email address is not verified")]
    EmailNotVerified,

    #[error("Sign-in provider is not configured")]
    NotConfigured,

    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),
}

/// Verifies an ID token issued by an external identity provider.
///
/// Implementations check signature/validity and that the token audience
/// matches this application.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, credential: &str) -> Result<VerifiedIdentity, IdentityError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_verifier_is_object_safe() {
        fn _accepts_dyn(_v: &dyn IdentityVerifier) {}
    }
}
