//! User module - accounts, credentials and linked identities.

mod password;
mod user;

pub use password::{hex_encode, PasswordHash, MIN_PASSWORD_LEN};
pub use user::{Email, OAuthLink, User, GOOGLE_PROVIDER};
