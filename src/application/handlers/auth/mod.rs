//! Account handlers - registration, sign-in and the current user.

mod current_user;
mod google_sign_in;
mod login;
mod register;

pub use current_user::CurrentUserHandler;
pub use google_sign_in::{GoogleSignInCommand, GoogleSignInHandler};
pub use login::{LoginCommand, LoginHandler};
pub use register::{RegisterCommand, RegisterHandler};

use crate::domain::foundation::{AuthError, DomainError, ErrorCode};
use crate::domain::user::User;
use crate::ports::{IssuedToken, TokenIssuer};

/// A signed-in user and their fresh access token.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user: User,
    pub token: IssuedToken,
}

pub(crate) fn sign_in(issuer: &dyn TokenIssuer, user: User) -> Result<SignedIn, DomainError> {
    let token = issuer.issue(&user.to_authenticated()).map_err(auth_failure)?;
    Ok(SignedIn { user, token })
}

pub(crate) fn auth_failure(err: AuthError) -> DomainError {
    match err {
        AuthError::ServiceUnavailable(message) => {
            DomainError::new(ErrorCode::ServiceUnavailable, message)
        }
        other => DomainError::new(ErrorCode::Unauthorized, other.to_string()),
    }
}
