//! Adapters - implementations of port interfaces.
//!
//! - `ai` - completion providers (OpenAI-compatible, scripted mock)
//! - `auth` - JWT access tokens and Google identity verification
//! - `http` - axum routers, extractors and the SSE agent endpoint
//! - `memory` - in-memory repositories for tests and local runs
//! - `postgres` - sqlx repositories

pub mod ai;
pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
