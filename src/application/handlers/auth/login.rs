//! LoginHandler - email and password sign-in.

use std::sync::Arc;
use tracing::debug;

use super::{sign_in, SignedIn};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::user::Email;
use crate::ports::{TokenIssuer, UserRepository};

#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenIssuer>,
}

fn invalid_credentials() -> DomainError {
    DomainError::new(ErrorCode::InvalidCredentials, "Incorrect email or password")
}

impl LoginHandler {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self { users, tokens }
    }

    /// Unknown email, wrong password and password-less accounts all give
    /// the same `InvalidCredentials` error.
    pub async fn handle(&self, cmd: LoginCommand) -> Result<SignedIn, DomainError> {
        let email = Email::parse(&cmd.email).map_err(|_| invalid_credentials())?;
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !user.verify_password(&cmd.password) {
            debug!(user_id = %user.id, "Password mismatch");
            return Err(invalid_credentials());
        }
        sign_in(self.tokens.as_ref(), user)
    }
}
