//! Google ID-token verification via the token-info endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::ports::{IdentityError, IdentityVerifier, VerifiedIdentity};

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// Expected `aud` claim. Verification is refused when unset.
    pub client_id: Option<String>,
    pub tokeninfo_url: String,
    pub timeout: Duration,
}

impl GoogleConfig {
    pub fn new(client_id: Option<String>) -> Self {
        Self {
            client_id: client_id.filter(|id| !id.trim().is_empty()),
            tokeninfo_url: TOKENINFO_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_tokeninfo_url(mut self, url: impl Into<String>) -> Self {
        self.tokeninfo_url = url.into();
        self
    }
}

/// Token-info fields. Google renders booleans as strings here.
#[derive(Debug, Deserialize)]
struct TokenInfo {
    sub: String,
    email: Option<String>,
    aud: Option<String>,
    #[serde(default)]
    email_verified: Option<serde_json::Value>,
    name: Option<String>,
    picture: Option<String>,
}

impl TokenInfo {
    fn email_verified(&self) -> bool {
        match &self.email_verified {
            Some(serde_json::Value::Bool(b)) => *b,
            Some(serde_json::Value::String(s)) => s == "true",
            _ => false,
        }
    }
}

pub struct GoogleIdentityVerifier {
    config: GoogleConfig,
    http_client: reqwest::Client,
}

impl GoogleIdentityVerifier {
    pub fn new(config: GoogleConfig) -> Result<Self, IdentityError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;
        Ok(Self {
            config,
            http_client,
        })
    }

    fn check(&self, client_id: &str, info: TokenInfo) -> Result<VerifiedIdentity, IdentityError> {
        if info.aud.as_deref() != Some(client_id) {
            tracing::warn!("Google token audience mismatch: {:?}", info.aud);
            return Err(IdentityError::AudienceMismatch);
        }
        let email_verified = info.email_verified();
        let email = info.email.ok_or_else(|| {
            tracing::warn!("Google token missing email claim");
            IdentityError::InvalidToken
        })?;

        Ok(VerifiedIdentity {
            subject: info.sub,
            email,
            email_verified,
            name: info.name,
            picture: info.picture,
        })
    }
}

#[async_trait]
impl IdentityVerifier for GoogleIdentityVerifier {
    async fn verify(&self, credential: &str) -> Result<VerifiedIdentity, IdentityError> {
        let client_id = self
            .config
            .client_id
            .as_deref()
            .ok_or(IdentityError::NotConfigured)?;

        let response = self
            .http_client
            .get(&self.config.tokeninfo_url)
            .query(&[("id_token", credential)])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach Google token info: {}", e);
                IdentityError::Unavailable(e.to_string())
            })?;

        if !response.status().is_success() {
            tracing::debug!("Google rejected ID token with {}", response.status());
            return Err(IdentityError::InvalidToken);
        }

        let info: TokenInfo = response.json().await.map_err(|e| {
            tracing::warn!("Unexpected token info body: {}", e);
            IdentityError::InvalidToken
        })?;

        self.check(client_id, info)
    }
}

impl std::fmt::Debug for GoogleIdentityVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleIdentityVerifier")
            .field("client_id", &self.config.client_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn verifier() -> GoogleIdentityVerifier {
        GoogleIdentityVerifier::new(GoogleConfig::new(Some("client-123".to_string()))).unwrap()
    }

    fn info(value: serde_json::Value) -> TokenInfo {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn accepts_matching_audience_with_string_flag() {
        let identity = verifier()
            .check(
                "client-123",
                info(json!({
                    "sub": "1234",
                    "email": "ana@example.com",
                    "aud": "client-123",
                    "email_verified": "true",
                    "name": "Ana",
                })),
            )
            .unwrap();

        assert_eq!(identity.subject, "1234");
        assert!(identity.email_verified);
        assert_eq!(identity.name.as_deref(), Some("Ana"));
    }

    #[test]
    fn rejects_other_audience() {
        let err = verifier()
            .check(
                "client-123",
                info(json!({"sub": "1", "email": "a@b.co", "aud": "someone-else"})),
            )
            .unwrap_err();
        assert_eq!(err, IdentityError::AudienceMismatch);
    }

    #[test]
    fn unverified_flag_is_passed_through() {
        let identity = verifier()
            .check(
                "client-123",
                info(json!({"sub": "1", "email": "a@b.co", "aud": "client-123", "email_verified": false})),
            )
            .unwrap();
        assert!(!identity.email_verified);
    }

    #[tokio::test]
    async fn unconfigured_client_id_refuses() {
        let verifier = GoogleIdentityVerifier::new(GoogleConfig::new(Some("  ".to_string()))).unwrap();
        assert_eq!(
            verifier.verify("token").await.unwrap_err(),
            IdentityError::NotConfigured
        );
    }
}
