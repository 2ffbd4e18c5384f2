//! GoogleSignInHandler - sign in (or sign up) with a Google ID token.

use std::sync::Arc;
use tracing::info;

use super::{sign_in, SignedIn};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::user::{Email, User, GOOGLE_PROVIDER};
use crate::ports::{IdentityError, IdentityVerifier, TokenIssuer, UserRepository};

#[derive(Debug, Clone)]
pub struct GoogleSignInCommand {
    pub credential: String,
}

pub struct GoogleSignInHandler {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenIssuer>,
    verifier: Arc<dyn IdentityVerifier>,
}

fn identity_failure(err: IdentityError) -> DomainError {
    let code = match err {
        IdentityError::InvalidToken | IdentityError::AudienceMismatch => ErrorCode::Unauthorized,
        IdentityError::EmailNotVerified => ErrorCode::ValidationFailed,
        IdentityError::NotConfigured => ErrorCode::ServiceUnavailable,
        IdentityError::Unavailable(_) => ErrorCode::IdentityProviderError,
    };
    DomainError::new(code, err.to_string())
}

impl GoogleSignInHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenIssuer>,
        verifier: Arc<dyn IdentityVerifier>,
    ) -> Self {
        Self {
            users,
            tokens,
            verifier,
        }
    }

    /// Resolution order: existing Google link, then an account with the
    /// same email (which gets linked), then a new account.
    pub async fn handle(&self, cmd: GoogleSignInCommand) -> Result<SignedIn, DomainError> {
        let identity = self
            .verifier
            .verify(&cmd.credential)
            .await
            .map_err(identity_failure)?;
        if !identity.email_verified {
            return Err(identity_failure(IdentityError::EmailNotVerified));
        }

        if let Some(mut user) = self
            .users
            .find_by_oauth(GOOGLE_PROVIDER, &identity.subject)
            .await?
        {
            user.refresh_google_profile(identity.name, identity.picture);
            self.users.update(&user).await?;
            return sign_in(self.tokens.as_ref(), user);
        }

        let email = Email::parse(&identity.email)?;
        if let Some(mut user) = self.users.find_by_email(&email).await? {
            user.link_google(identity.subject, identity.name, identity.picture);
            self.users.update(&user).await?;
            info!(user_id = %user.id, "Linked Google account");
            return sign_in(self.tokens.as_ref(), user);
        }

        let user = User::from_google(
            &identity.email,
            identity.subject,
            identity.name,
            identity.picture,
        )?;
        self.users.save(&user).await?;
        info!(user_id = %user.id, "User registered with Google");
        sign_in(self.tokens.as_ref(), user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::{MockIdentityVerifier, MockSessionValidator};
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::ports::VerifiedIdentity;

    fn identity(subject: &str, email: &str, verified: bool) -> VerifiedIdentity {
        VerifiedIdentity {
            subject: subject.to_string(),
            email: email.to_string(),
            email_verified: verified,
            name: Some("Ana Google".to_string()),
            picture: Some("https://example.com/ana.png".to_string()),
        }
    }

    fn handler(users: &InMemoryUserRepository, verifier: MockIdentityVerifier) -> GoogleSignInHandler {
        GoogleSignInHandler::new(
            Arc::new(users.clone()),
            Arc::new(MockSessionValidator::new()),
            Arc::new(verifier),
        )
    }

    fn credential(value: &str) -> GoogleSignInCommand {
        GoogleSignInCommand {
            credential: value.to_string(),
        }
    }

    #[tokio::test]
    async fn new_identity_creates_account() {
        let users = InMemoryUserRepository::new();
        let verifier =
            MockIdentityVerifier::new().with_identity("cred", identity("g-1", "ana@example.com", true));

        let signed_in = handler(&users, verifier).handle(credential("cred")).await.unwrap();

        assert!(signed_in.user.password_hash.is_none());
        assert_eq!(signed_in.user.full_name.as_deref(), Some("Ana Google"));
    }

    #[tokio::test]
    async fn existing_email_account_is_linked() {
        let users = InMemoryUserRepository::new();
        let existing = User::register("ana@example.com", "correct-horse", Some("Ana".into())).unwrap();
        users.save(&existing).await.unwrap();
        let verifier =
            MockIdentityVerifier::new().with_identity("cred", identity("g-1", "ana@example.com", true));

        let signed_in = handler(&users, verifier).handle(credential("cred")).await.unwrap();

        assert_eq!(signed_in.user.id, existing.id);
        assert_eq!(signed_in.user.full_name.as_deref(), Some("Ana"));
        assert!(users.find_by_oauth(GOOGLE_PROVIDER, "g-1").await.unwrap().is_some());
        assert!(signed_in.user.verify_password("correct-horse"));
    }

    #[tokio::test]
    async fn linked_account_is_found_by_subject() {
        let users = InMemoryUserRepository::new();
        let existing = User::from_google("old@example.com", "g-1", None, None).unwrap();
        users.save(&existing).await.unwrap();
        let verifier =
            MockIdentityVerifier::new().with_identity("cred", identity("g-1", "new@example.com", true));

        let signed_in = handler(&users, verifier).handle(credential("cred")).await.unwrap();

        assert_eq!(signed_in.user.id, existing.id);
        assert_eq!(signed_in.user.full_name.as_deref(), Some("Ana Google"));
    }

    #[tokio::test]
    async fn unverified_email_is_rejected() {
        let verifier =
            MockIdentityVerifier::new().with_identity("cred", identity("g-1", "ana@example.com", false));

        let err = handler(&InMemoryUserRepository::new(), verifier)
            .handle(credential("cred"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn verifier_errors_map_to_codes() {
        let verifier = MockIdentityVerifier::new()
            .with_error("off", IdentityError::NotConfigured)
            .with_error("other-app", IdentityError::AudienceMismatch);
        let handler = handler(&InMemoryUserRepository::new(), verifier);

        let err = handler.handle(credential("off")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
        let err = handler.handle(credential("other-app")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
