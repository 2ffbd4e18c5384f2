//! Authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

const MIN_SECRET_LEN: usize = 32;

/// Access-token signing and Google sign-in configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret for access tokens
    pub jwt_secret: Secret<String>,

    #[serde(default = "default_token_lifetime")]
    pub access_token_expire_minutes: u64,

    /// OAuth client id expected as the `aud` of Google ID tokens.
    /// Google sign-in is disabled when unset.
    pub google_client_id: Option<String>,
}

impl AuthConfig {
    pub fn token_lifetime(&self) -> Duration {
        Duration::from_secs(self.access_token_expire_minutes * 60)
    }

    pub fn google_enabled(&self) -> bool {
        self.google_client_id
            .as_ref()
            .is_some_and(|id| !id.trim().is_empty())
    }

    /// Development accepts any non-empty secret; other environments
    /// require at least 32 characters.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if *environment != Environment::Development && secret.len() < MIN_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort(MIN_SECRET_LEN));
        }
        if self.access_token_expire_minutes == 0 || self.access_token_expire_minutes > 1440 {
            return Err(ValidationError::InvalidTokenLifetime);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Secret::new(String::new()),
            access_token_expire_minutes: default_token_lifetime(),
            google_client_id: None,
        }
    }
}

fn default_token_lifetime() -> u64 {
    30
}
