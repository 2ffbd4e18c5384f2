//! PostgreSQL implementation of TripRepository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, db_error};
use crate::domain::foundation::{DomainError, ErrorCode, ShareId, Timestamp, TripId, UserId};
use crate::domain::trip::{Trip, TripStatus};
use crate::ports::TripRepository;

const TRIP_COLUMNS: &str = "id, user_id, name, status, destination, start_date, end_date, \
                            travelers, budget, currency, notes, share_id, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresTripRepository {
    pool: PgPool,
}

impl PostgresTripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn trip_not_found(id: &TripId) -> DomainError {
    DomainError::not_found(ErrorCode::TripNotFound, format!("Trip not found: {}", id))
}

#[async_trait]
impl TripRepository for PostgresTripRepository {
    async fn save(&self, trip: &Trip) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO trips (
                id, user_id, name, status, destination, start_date, end_date,
                travelers, budget, currency, notes, share_id, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(trip.id.as_uuid())
        .bind(trip.owner.as_uuid())
        .bind(&trip.name)
        .bind(trip.status.as_str())
        .bind(trip.destination.as_deref())
        .bind(trip.start_date)
        .bind(trip.end_date)
        .bind(trip.travelers as i32)
        .bind(trip.budget)
        .bind(&trip.currency)
        .bind(trip.notes.as_deref())
        .bind(trip.share_id.as_ref().map(|s| s.as_str()))
        .bind(trip.created_at.as_datetime())
        .bind(trip.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("insert trip"))?;

        Ok(())
    }

    async fn update(&self, trip: &Trip) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE trips SET
                name = $2,
                status = $3,
                destination = $4,
                start_date = $5,
                end_date = $6,
                travelers = $7,
                budget = $8,
                currency = $9,
                notes = $10,
                share_id = $11,
                updated_at = $12
            WHERE id = $1
            "#,
        )
        .bind(trip.id.as_uuid())
        .bind(&trip.name)
        .bind(trip.status.as_str())
        .bind(trip.destination.as_deref())
        .bind(trip.start_date)
        .bind(trip.end_date)
        .bind(trip.travelers as i32)
        .bind(trip.budget)
        .bind(&trip.currency)
        .bind(trip.notes.as_deref())
        .bind(trip.share_id.as_ref().map(|s| s.as_str()))
        .bind(trip.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("update trip"))?;

        if result.rows_affected() == 0 {
            return Err(trip_not_found(&trip.id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &TripId) -> Result<Option<Trip>, DomainError> {
        let sql = format!("SELECT {} FROM trips WHERE id = $1", TRIP_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch trip"))?;
        row.as_ref().map(row_to_trip).transpose()
    }

    async fn find_by_share_id(&self, share_id: &ShareId) -> Result<Option<Trip>, DomainError> {
        let sql = format!("SELECT {} FROM trips WHERE share_id = $1", TRIP_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(share_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch shared trip"))?;
        row.as_ref().map(row_to_trip).transpose()
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Trip>, DomainError> {
        let sql = format!(
            "SELECT {} FROM trips WHERE user_id = $1 ORDER BY updated_at DESC",
            TRIP_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(owner.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list trips"))?;
        rows.iter().map(row_to_trip).collect()
    }

    async fn delete(&self, id: &TripId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete trip"))?;

        if result.rows_affected() == 0 {
            return Err(trip_not_found(id));
        }
        Ok(())
    }
}

fn row_to_trip(row: &PgRow) -> Result<Trip, DomainError> {
    let status: String = column(row, "status")?;
    let status: TripStatus = status
        .parse()
        .map_err(|e| DomainError::database(format!("Invalid trip status: {}", e)))?;
    let share_id: Option<String> = column(row, "share_id")?;
    let share_id = share_id
        .map(ShareId::parse)
        .transpose()
        .map_err(|e| DomainError::database(format!("Invalid share id: {}", e)))?;
    let travelers: i32 = column(row, "travelers")?;
    let start_date: Option<NaiveDate> = column(row, "start_date")?;
    let end_date: Option<NaiveDate> = column(row, "end_date")?;
    let created_at: DateTime<Utc> = column(row, "created_at")?;
    let updated_at: DateTime<Utc> = column(row, "updated_at")?;

    Ok(Trip {
        id: TripId::from_uuid(column(row, "id")?),
        owner: UserId::from_uuid(column(row, "user_id")?),
        name: column(row, "name")?,
        status,
        destination: column(row, "destination")?,
        start_date,
        end_date,
        travelers: travelers.max(0) as u32,
        budget: column(row, "budget")?,
        currency: column(row, "currency")?,
        notes: column(row, "notes")?,
        share_id,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}
