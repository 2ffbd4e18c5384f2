//! User aggregate.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::password::PasswordHash;
use crate::domain::foundation::{AuthenticatedUser, Timestamp, UserId, ValidationError};

pub const GOOGLE_PROVIDER: &str = "google";

/// Normalised (trimmed, lowercase) email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let value = value.trim().to_lowercase();
        if value.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        match value.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(Self(value)),
            _ => Err(ValidationError::invalid_format("email", "not an email address")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// External identity linked to an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthLink {
    pub provider: String,
    pub subject: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub full_name: Option<String>,
    pub password_hash: Option<PasswordHash>,
    pub oauth: Option<OAuthLink>,
    pub avatar_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

fn clean_name(name: Option<String>) -> Option<String> {
    name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

impl User {
    /// New account with email and password credentials.
    pub fn register(
        email: &str,
        password: &str,
        full_name: Option<String>,
    ) -> Result<Self, ValidationError> {
        let now = Timestamp::now();
        Ok(Self {
            id: UserId::new(),
            email: Email::parse(email)?,
            full_name: clean_name(full_name),
            password_hash: Some(PasswordHash::create(password)?),
            oauth: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// New account created from a verified Google identity. No password.
    pub fn from_google(
        email: &str,
        subject: impl Into<String>,
        full_name: Option<String>,
        avatar_url: Option<String>,
    ) -> Result<Self, ValidationError> {
        let now = Timestamp::now();
        Ok(Self {
            id: UserId::new(),
            email: Email::parse(email)?,
            full_name: clean_name(full_name),
            password_hash: None,
            oauth: Some(OAuthLink {
                provider: GOOGLE_PROVIDER.to_string(),
                subject: subject.into(),
            }),
            avatar_url,
            created_at: now,
            updated_at: now,
        })
    }

    /// Attaches a Google identity to an existing email account.
    ///
    /// Google's picture replaces the avatar when present; the name is only
    /// filled in when the account has none.
    pub fn link_google(
        &mut self,
        subject: impl Into<String>,
        name: Option<String>,
        picture: Option<String>,
    ) {
        self.oauth = Some(OAuthLink {
            provider: GOOGLE_PROVIDER.to_string(),
            subject: subject.into(),
        });
        if self.full_name.is_none() {
            self.full_name = clean_name(name);
        }
        if picture.is_some() {
            self.avatar_url = picture;
        }
        self.updated_at = Timestamp::now();
    }

    /// Refreshes name and avatar from a repeat Google sign-in.
    pub fn refresh_google_profile(&mut self, name: Option<String>, picture: Option<String>) {
        if let Some(name) = clean_name(name) {
            self.full_name = Some(name);
        }
        if picture.is_some() {
            self.avatar_url = picture;
        }
        self.updated_at = Timestamp::now();
    }

    /// Identity carried in access tokens.
    pub fn to_authenticated(&self) -> AuthenticatedUser {
        AuthenticatedUser::new(self.id, self.email.as_str(), self.full_name.clone())
    }

    /// Accounts without a password (OAuth-only) never verify.
    pub fn verify_password(&self, candidate: &str) -> bool {
        self.password_hash
            .as_ref()
            .is_some_and(|hash| hash.verify(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_normalised() {
        assert_eq!(Email::parse("  Ana@Example.COM ").unwrap().as_str(), "ana@example.com");
    }

    #[test]
    fn email_requires_local_part_and_domain() {
        assert!(Email::parse("").is_err());
        assert!(Email::parse("ana").is_err());
        assert!(Email::parse("@example.com").is_err());
        assert!(Email::parse("ana@localhost").is_err());
    }

    #[test]
    fn registered_user_verifies_password() {
        let user = User::register("ana@example.com", "lisbon2025", Some(" Ana ".into())).unwrap();
        assert!(user.verify_password("lisbon2025"));
        assert!(!user.verify_password("porto2025"));
        assert_eq!(user.full_name.as_deref(), Some("Ana"));
        assert!(user.oauth.is_none());
    }

    #[test]
    fn google_user_has_no_password() {
        let user = User::from_google("ana@example.com", "sub-1", None, None).unwrap();
        assert!(!user.verify_password(""));
        assert_eq!(user.oauth.as_ref().unwrap().provider, GOOGLE_PROVIDER);
    }

    #[test]
    fn linking_google_keeps_password_and_existing_name() {
        let mut user =
            User::register("ana@example.com", "lisbon2025", Some("Ana".into())).unwrap();

        user.link_google(
            "sub-9",
            Some("Ana Google".to_string()),
            Some("https://google/pic.png".to_string()),
        );

        assert_eq!(user.oauth.as_ref().unwrap().subject, "sub-9");
        assert_eq!(user.full_name.as_deref(), Some("Ana"));
        assert_eq!(user.avatar_url.as_deref(), Some("https://google/pic.png"));
        assert!(user.verify_password("lisbon2025"));
    }

    #[test]
    fn refresh_keeps_values_google_omits() {
        let mut user = User::from_google(
            "ana@example.com",
            "sub-1",
            Some("Ana".into()),
            Some("https://google/a.png".into()),
        )
        .unwrap();

        user.refresh_google_profile(None, None);
        assert_eq!(user.full_name.as_deref(), Some("Ana"));
        assert_eq!(user.avatar_url.as_deref(), Some("https://google/a.png"));

        user.refresh_google_profile(Some("Ana S.".into()), None);
        assert_eq!(user.full_name.as_deref(), Some("Ana S."));
    }
}
