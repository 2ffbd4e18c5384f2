//! PostgreSQL adapters - database implementations of the repository ports.
//!
//! - `PostgresUserRepository` - accounts and linked identities
//! - `PostgresTripRepository` - trips and share tokens
//! - `PostgresItineraryRepository` - one JSONB plan per trip
//! - `PostgresPackingRepository` / `PostgresTodoRepository` - checklists
//! - `PostgresChatRepository` - chat sessions and transcripts
//!
//! Child rows are removed by `ON DELETE CASCADE` when a trip or user goes.

mod chat_repository;
mod checklist_repository;
mod itinerary_repository;
mod trip_repository;
mod user_repository;

pub use chat_repository::PostgresChatRepository;
pub use checklist_repository::{PostgresPackingRepository, PostgresTodoRepository};
pub use itinerary_repository::PostgresItineraryRepository;
pub use trip_repository::PostgresTripRepository;
pub use user_repository::PostgresUserRepository;

use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Postgres, Row};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::domain::foundation::DomainError;

/// Opens the connection pool described by `config`.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect(&config.url)
        .await?;
    info!(max_connections = config.max_connections, "Database pool ready");
    Ok(pool)
}

/// Applies the embedded schema migrations.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

pub(crate) fn db_error(action: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::database(format!("Failed to {}: {}", action, e))
}

/// Reads one column, mapping decode failures to `DatabaseError`.
pub(crate) fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(format!("Failed to get {}: {}", name, e)))
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}
