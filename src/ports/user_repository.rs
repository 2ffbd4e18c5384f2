//! User repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{Email, User};

/// Persistence for user accounts.
///
/// Emails are unique; implementations reject a second account with the
/// same normalised email with `EmailAlreadyRegistered`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Save a new user.
    ///
    /// # Errors
    ///
    /// - `EmailAlreadyRegistered` if the email is taken
    /// - `DatabaseError` on persistence failure
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    /// Update an existing user.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError>;

    /// Find the account linked to an external identity.
    async fn find_by_oauth(
        &self,
        provider: &str,
        subject: &str,
    ) -> Result<Option<User>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn UserRepository) {}
    }
}
