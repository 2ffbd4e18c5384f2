//! RegisterHandler - email and password sign-up.

use std::sync::Arc;
use tracing::info;

use super::{sign_in, SignedIn};
use crate::domain::foundation::DomainError;
use crate::domain::user::User;
use crate::ports::{TokenIssuer, UserRepository};

#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

pub struct RegisterHandler {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenIssuer>,
}

impl RegisterHandler {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self { users, tokens }
    }

    /// Fails with `EmailAlreadyRegistered` when the address is taken.
    pub async fn handle(&self, cmd: RegisterCommand) -> Result<SignedIn, DomainError> {
        let user = User::register(&cmd.email, &cmd.password, cmd.full_name)?;
        self.users.save(&user).await?;
        info!(user_id = %user.id, "User registered");
        sign_in(self.tokens.as_ref(), user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::domain::foundation::ErrorCode;

    fn handler(users: &InMemoryUserRepository) -> RegisterHandler {
        RegisterHandler::new(Arc::new(users.clone()), Arc::new(MockSessionValidator::new()))
    }

    fn command(email: &str) -> RegisterCommand {
        RegisterCommand {
            email: email.to_string(),
            password: "correct-horse".to_string(),
            full_name: Some("Ana".to_string()),
        }
    }

    #[tokio::test]
    async fn registers_and_issues_token() {
        let users = InMemoryUserRepository::new();
        let signed_in = handler(&users).handle(command("Ana@Example.com")).await.unwrap();

        assert_eq!(signed_in.user.email.as_str(), "ana@example.com");
        assert!(!signed_in.token.access_token.is_empty());
        assert!(users.find_by_id(&signed_in.user.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let users = InMemoryUserRepository::new();
        handler(&users).handle(command("ana@example.com")).await.unwrap();

        let err = handler(&users)
            .handle(command("ana@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::EmailAlreadyRegistered);
    }

    #[tokio::test]
    async fn short_password_is_a_validation_error() {
        let mut cmd = command("ana@example.com");
        cmd.password = "short".to_string();

        let err = handler(&InMemoryUserRepository::new())
            .handle(cmd)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }
}
