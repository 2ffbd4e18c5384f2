//! PostgreSQL implementations of PackingRepository and TodoRepository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, db_error};
use crate::domain::checklist::{PackingItem, Todo};
use crate::domain::foundation::{DomainError, ErrorCode, PackingItemId, Timestamp, TodoId, TripId};
use crate::ports::{PackingRepository, TodoRepository};

#[derive(Clone)]
pub struct PostgresPackingRepository {
    pool: PgPool,
}

impl PostgresPackingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PackingRepository for PostgresPackingRepository {
    async fn list_by_trip(&self, trip_id: &TripId) -> Result<Vec<PackingItem>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, trip_id, category, item, packed, quantity, notes, created_at
            FROM packing_items
            WHERE trip_id = $1
            ORDER BY category, created_at
            "#,
        )
        .bind(trip_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list packing items"))?;

        rows.iter().map(row_to_packing_item).collect()
    }

    async fn find(
        &self,
        trip_id: &TripId,
        id: &PackingItemId,
    ) -> Result<Option<PackingItem>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, trip_id, category, item, packed, quantity, notes, created_at
            FROM packing_items
            WHERE id = $1 AND trip_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(trip_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch packing item"))?;

        row.as_ref().map(row_to_packing_item).transpose()
    }

    async fn save(&self, item: &PackingItem) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO packing_items (
                id, trip_id, category, item, packed, quantity, notes, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(item.id.as_uuid())
        .bind(item.trip_id.as_uuid())
        .bind(&item.category)
        .bind(&item.item)
        .bind(item.packed)
        .bind(item.quantity)
        .bind(item.notes.as_deref())
        .bind(item.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("insert packing item"))?;

        Ok(())
    }

    async fn update(&self, item: &PackingItem) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE packing_items SET
                category = $3,
                item = $4,
                packed = $5,
                quantity = $6,
                notes = $7
            WHERE id = $1 AND trip_id = $2
            "#,
        )
        .bind(item.id.as_uuid())
        .bind(item.trip_id.as_uuid())
        .bind(&item.category)
        .bind(&item.item)
        .bind(item.packed)
        .bind(item.quantity)
        .bind(item.notes.as_deref())
        .execute(&self.pool)
        .await
        .map_err(db_error("update packing item"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::PackingItemNotFound,
                format!("Packing item not found: {}", item.id),
            ));
        }
        Ok(())
    }

    async fn delete(&self, trip_id: &TripId, id: &PackingItemId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM packing_items WHERE id = $1 AND trip_id = $2")
            .bind(id.as_uuid())
            .bind(trip_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete packing item"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::PackingItemNotFound,
                format!("Packing item not found: {}", id),
            ));
        }
        Ok(())
    }
}

fn row_to_packing_item(row: &PgRow) -> Result<PackingItem, DomainError> {
    let created_at: DateTime<Utc> = column(row, "created_at")?;
    Ok(PackingItem {
        id: PackingItemId::from_uuid(column(row, "id")?),
        trip_id: TripId::from_uuid(column(row, "trip_id")?),
        category: column(row, "category")?,
        item: column(row, "item")?,
        packed: column(row, "packed")?,
        quantity: column(row, "quantity")?,
        notes: column(row, "notes")?,
        created_at: Timestamp::from_datetime(created_at),
    })
}

#[derive(Clone)]
pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn list_by_trip(&self, trip_id: &TripId) -> Result<Vec<Todo>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, trip_id, title, description, completed, due_date,
                   completed_at, priority, created_at
            FROM todos
            WHERE trip_id = $1
            ORDER BY priority DESC, created_at
            "#,
        )
        .bind(trip_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list todos"))?;

        rows.iter().map(row_to_todo).collect()
    }

    async fn find(&self, trip_id: &TripId, id: &TodoId) -> Result<Option<Todo>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, trip_id, title, description, completed, due_date,
                   completed_at, priority, created_at
            FROM todos
            WHERE id = $1 AND trip_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(trip_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch todo"))?;

        row.as_ref().map(row_to_todo).transpose()
    }

    async fn save(&self, todo: &Todo) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO todos (
                id, trip_id, title, description, completed, due_date,
                completed_at, priority, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(todo.id.as_uuid())
        .bind(todo.trip_id.as_uuid())
        .bind(&todo.title)
        .bind(todo.description.as_deref())
        .bind(todo.completed)
        .bind(todo.due_date)
        .bind(todo.completed_at.as_ref().map(|t| *t.as_datetime()))
        .bind(todo.priority)
        .bind(todo.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("insert todo"))?;

        Ok(())
    }

    async fn update(&self, todo: &Todo) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE todos SET
                title = $3,
                description = $4,
                completed = $5,
                due_date = $6,
                completed_at = $7,
                priority = $8
            WHERE id = $1 AND trip_id = $2
            "#,
        )
        .bind(todo.id.as_uuid())
        .bind(todo.trip_id.as_uuid())
        .bind(&todo.title)
        .bind(todo.description.as_deref())
        .bind(todo.completed)
        .bind(todo.due_date)
        .bind(todo.completed_at.as_ref().map(|t| *t.as_datetime()))
        .bind(todo.priority)
        .execute(&self.pool)
        .await
        .map_err(db_error("update todo"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::TodoNotFound,
                format!("Todo not found: {}", todo.id),
            ));
        }
        Ok(())
    }

    async fn delete(&self, trip_id: &TripId, id: &TodoId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND trip_id = $2")
            .bind(id.as_uuid())
            .bind(trip_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete todo"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::TodoNotFound,
                format!("Todo not found: {}", id),
            ));
        }
        Ok(())
    }
}

fn row_to_todo(row: &PgRow) -> Result<Todo, DomainError> {
    let due_date: Option<NaiveDate> = column(row, "due_date")?;
    let completed_at: Option<DateTime<Utc>> = column(row, "completed_at")?;
    let created_at: DateTime<Utc> = column(row, "created_at")?;

    Ok(Todo {
        id: TodoId::from_uuid(column(row, "id")?),
        trip_id: TripId::from_uuid(column(row, "trip_id")?),
        title: column(row, "title")?,
        description: column(row, "description")?,
        completed: column(row, "completed")?,
        due_date,
        completed_at: completed_at.map(Timestamp::from_datetime),
        priority: column(row, "priority")?,
        created_at: Timestamp::from_datetime(created_at),
    })
}
