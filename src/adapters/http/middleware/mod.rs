//! HTTP middleware for axum.
//!
//! - `auth` - bearer token middleware and extractors

pub mod auth;

pub use auth::{auth_middleware, AuthState, OptionalAuth, RequireAuth};
