//! Authentication adapters.
//!
//! - `jwt` - HS256 access tokens (`TokenIssuer` + `SessionValidator`)
//! - `google` - Google ID-token verification (`IdentityVerifier`)
//! - `mock` - test doubles that need no secrets or network

mod google;
mod jwt;
mod mock;

pub use google::{GoogleConfig, GoogleIdentityVerifier};
pub use jwt::JwtTokenService;
pub use mock::{MockIdentityVerifier, MockSessionValidator};
