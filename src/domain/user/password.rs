//! Salted password digests.
//!
//! Stored form is `salt_hex:digest_hex` where the digest is
//! HMAC-SHA256 keyed by the salt over the password bytes.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::domain::foundation::ValidationError;

type HmacSha256 = Hmac<Sha256>;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Encode bytes to a lowercase hex string.
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn digest(salt: &str, password: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(salt.as_bytes()).expect("HMAC can take key of any size");
    mac.update(password.as_bytes());
    hex_encode(&mac.finalize().into_bytes())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hashes a new password with a fresh random salt.
    pub fn create(password: &str) -> Result<Self, ValidationError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::invalid_format(
                "password",
                format!("must be at least {} characters", MIN_PASSWORD_LEN),
            ));
        }
        let salt = Uuid::new_v4().simple().to_string();
        let digest = digest(&salt, password);
        Ok(Self(format!("{}:{}", salt, digest)))
    }

    /// Wraps a previously stored hash.
    pub fn from_stored(stored: impl Into<String>) -> Self {
        Self(stored.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constant-time check of a candidate password.
    pub fn verify(&self, candidate: &str) -> bool {
        let Some((salt, expected)) = self.0.split_once(':') else {
            return false;
        };
        let actual = digest(salt, candidate);
        actual.as_bytes().ct_eq(expected.as_bytes()).unwrap_u8() == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_original_password_only() {
        let hash = PasswordHash::create("correct horse").unwrap();
        assert!(hash.verify("correct horse"));
        assert!(!hash.verify("Correct horse"));
        assert!(!hash.verify(""));
    }

    #[test]
    fn same_password_gets_different_salts() {
        let a = PasswordHash::create("password123").unwrap();
        let b = PasswordHash::create("password123").unwrap();
        assert_ne!(a, b);
        assert!(a.verify("password123") && b.verify("password123"));
    }

    #[test]
    fn stored_format_is_salt_and_digest() {
        let hash = PasswordHash::create("password123").unwrap();
        let (salt, digest) = hash.as_str().split_once(':').unwrap();
        assert_eq!(salt.len(), 32);
        assert_eq!(digest.len(), 64);
    }

    #[test]
    fn short_password_rejected() {
        assert!(PasswordHash::create("short").is_err());
    }

    #[test]
    fn malformed_stored_hash_never_verifies() {
        assert!(!PasswordHash::from_stored("no-separator").verify("no-separator"));
    }

    #[test]
    fn hex_encode_pads_bytes() {
        assert_eq!(hex_encode(&[0x00, 0x0f, 0xff]), "000fff");
    }
}
