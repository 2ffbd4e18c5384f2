//! PostgreSQL implementation of ItineraryRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::PgPool;

use super::{column, db_error};
use crate::domain::foundation::{DomainError, ItineraryId, Timestamp, TripId};
use crate::domain::itinerary::Itinerary;
use crate::ports::ItineraryRepository;

#[derive(Clone)]
pub struct PostgresItineraryRepository {
    pool: PgPool,
}

impl PostgresItineraryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItineraryRepository for PostgresItineraryRepository {
    async fn find_by_trip(&self, trip_id: &TripId) -> Result<Option<Itinerary>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, trip_id, data, version, created_at, updated_at
            FROM itineraries
            WHERE trip_id = $1
            "#,
        )
        .bind(trip_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch itinerary"))?;

        row.as_ref().map(row_to_itinerary).transpose()
    }

    async fn upsert(&self, itinerary: &Itinerary) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO itineraries (id, trip_id, data, version, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (trip_id) DO UPDATE SET
                data = EXCLUDED.data,
                version = EXCLUDED.version,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(itinerary.id.as_uuid())
        .bind(itinerary.trip_id.as_uuid())
        .bind(Json(&itinerary.data))
        .bind(itinerary.version)
        .bind(itinerary.created_at.as_datetime())
        .bind(itinerary.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("upsert itinerary"))?;

        Ok(())
    }
}

fn row_to_itinerary(row: &PgRow) -> Result<Itinerary, DomainError> {
    let data: Json<Value> = column(row, "data")?;
    let created_at: DateTime<Utc> = column(row, "created_at")?;
    let updated_at: DateTime<Utc> = column(row, "updated_at")?;

    Ok(Itinerary {
        id: ItineraryId::from_uuid(column(row, "id")?),
        trip_id: TripId::from_uuid(column(row, "trip_id")?),
        data: data.0,
        version: column(row, "version")?,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}
