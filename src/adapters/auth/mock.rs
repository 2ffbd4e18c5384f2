//! Mock authentication adapters for tests.
//!
//! ```ignore
//! let validator = MockSessionValidator::new()
//!     .with_user("valid-token", AuthenticatedUser::new(UserId::new(), "ana@example.com", None));
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::{
    IdentityError, IdentityVerifier, IssuedToken, SessionValidator, TokenIssuer, VerifiedIdentity,
};

/// Token table standing in for real token issuing and validation.
///
/// `issue` mints `mock-token-<user id>` and remembers the user, so tokens
/// it hands out validate later.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.add_token(token, user);
        self
    }

    /// Forces all validations to fail with `error`.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap_or_else(|e| e.into_inner()) = Some(error);
        self
    }

    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.tokens
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(token.into(), user);
    }

    pub fn token_count(&self) -> usize {
        self.tokens.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self
            .force_error
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
        {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

impl TokenIssuer for MockSessionValidator {
    fn issue(&self, user: &AuthenticatedUser) -> Result<IssuedToken, AuthError> {
        let access_token = format!("mock-token-{}", user.id);
        self.add_token(access_token.clone(), user.clone());
        Ok(IssuedToken {
            access_token,
            expires_in_secs: 1800,
        })
    }
}

/// Identity verifier answering from a fixed credential table.
#[derive(Debug, Default)]
pub struct MockIdentityVerifier {
    identities: RwLock<HashMap<String, Result<VerifiedIdentity, IdentityError>>>,
}

impl MockIdentityVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(self, credential: impl Into<String>, identity: VerifiedIdentity) -> Self {
        self.insert(credential.into(), Ok(identity));
        self
    }

    pub fn with_error(self, credential: impl Into<String>, error: IdentityError) -> Self {
        self.insert(credential.into(), Err(error));
        self
    }

    fn insert(&self, credential: String, result: Result<VerifiedIdentity, IdentityError>) {
        self.identities
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(credential, result);
    }
}

#[async_trait]
impl IdentityVerifier for MockIdentityVerifier {
    async fn verify(&self, credential: &str) -> Result<VerifiedIdentity, IdentityError> {
        self.identities
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(credential)
            .cloned()
            .unwrap_or(Err(IdentityError::InvalidToken))
    }
}
