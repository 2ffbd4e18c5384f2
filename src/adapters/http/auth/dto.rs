//! HTTP DTOs for account endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::auth::SignedIn;
use crate::domain::foundation::Timestamp;
use crate::domain::user::User;

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Google Identity Services ID token.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleAuthRequest {
    pub credential: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub auth_provider: Option<String>,
    pub created_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.to_string(),
            full_name: user.full_name.clone(),
            avatar_url: user.avatar_url.clone(),
            auth_provider: user.oauth.as_ref().map(|o| o.provider.clone()),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
    pub user: UserResponse,
}

impl From<SignedIn> for TokenResponse {
    fn from(signed_in: SignedIn) -> Self {
        Self {
            access_token: signed_in.token.access_token,
            token_type: "bearer",
            expires_in: signed_in.token.expires_in_secs,
            user: UserResponse::from(&signed_in.user),
        }
    }
}

