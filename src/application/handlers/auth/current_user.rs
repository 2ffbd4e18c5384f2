//! CurrentUserHandler - loads the account behind an access token.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

pub struct CurrentUserHandler {
    users: Arc<dyn UserRepository>,
}

impl CurrentUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// A valid token for a deleted account is `Unauthorized`.
    pub async fn handle(&self, user_id: &UserId) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::Unauthorized, "User not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserRepository;

    #[tokio::test]
    async fn returns_stored_user_or_unauthorized() {
        let users = InMemoryUserRepository::new();
        let user = User::register("ana@example.com", "correct-horse", None).unwrap();
        users.save(&user).await.unwrap();
        let handler = CurrentUserHandler::new(Arc::new(users));

        assert_eq!(handler.handle(&user.id).await.unwrap().id, user.id);
        let err = handler.handle(&UserId::new()).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
