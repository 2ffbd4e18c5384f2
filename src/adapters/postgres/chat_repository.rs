//! PostgreSQL implementation of ChatRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::{column, db_error};
use crate::domain::assistant::Role;
use crate::domain::chat::{ChatMessage, ChatSession};
use crate::domain::foundation::{
    ChatMessageId, ChatSessionId, DomainError, ErrorCode, Timestamp, TripId, UserId,
};
use crate::ports::ChatRepository;

#[derive(Clone)]
pub struct PostgresChatRepository {
    pool: PgPool,
}

impl PostgresChatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn session_not_found(id: &ChatSessionId) -> DomainError {
    DomainError::not_found(
        ErrorCode::ChatSessionNotFound,
        format!("Chat session not found: {}", id),
    )
}

#[async_trait]
impl ChatRepository for PostgresChatRepository {
    async fn save_session(&self, session: &ChatSession) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO chat_sessions (id, user_id, trip_id, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(session.id.as_uuid())
        .bind(session.owner.as_uuid())
        .bind(session.trip_id.map(|t| *t.as_uuid()))
        .bind(session.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("insert chat session"))?;

        Ok(())
    }

    async fn find_session(&self, id: &ChatSessionId) -> Result<Option<ChatSession>, DomainError> {
        let row = sqlx::query(
            "SELECT id, user_id, trip_id, created_at FROM chat_sessions WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch chat session"))?;

        row.as_ref().map(row_to_session).transpose()
    }

    async fn list_sessions(&self, owner: &UserId) -> Result<Vec<ChatSession>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, trip_id, created_at
            FROM chat_sessions
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list chat sessions"))?;

        rows.iter().map(row_to_session).collect()
    }

    async fn delete_session(&self, id: &ChatSessionId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM chat_sessions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete chat session"))?;

        if result.rows_affected() == 0 {
            return Err(session_not_found(id));
        }
        Ok(())
    }

    async fn append_message(&self, message: &ChatMessage) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO chat_messages (id, session_id, role, content, metadata, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(message.id.as_uuid())
        .bind(message.session_id.as_uuid())
        .bind(message.role.as_str())
        .bind(&message.content)
        .bind(message.metadata.as_ref().map(Json))
        .bind(message.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let missing_session = e
                .as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation());
            if missing_session {
                session_not_found(&message.session_id)
            } else {
                db_error("insert chat message")(e)
            }
        })?;

        Ok(())
    }

    async fn messages(&self, session_id: &ChatSessionId) -> Result<Vec<ChatMessage>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, session_id, role, content, metadata, created_at
            FROM chat_messages
            WHERE session_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("fetch chat messages"))?;

        rows.iter().map(row_to_message).collect()
    }
}

fn row_to_session(row: &PgRow) -> Result<ChatSession, DomainError> {
    let trip_id: Option<Uuid> = column(row, "trip_id")?;
    let created_at: DateTime<Utc> = column(row, "created_at")?;
    Ok(ChatSession {
        id: ChatSessionId::from_uuid(column(row, "id")?),
        owner: UserId::from_uuid(column(row, "user_id")?),
        trip_id: trip_id.map(TripId::from_uuid),
        created_at: Timestamp::from_datetime(created_at),
    })
}

fn row_to_message(row: &PgRow) -> Result<ChatMessage, DomainError> {
    let role: String = column(row, "role")?;
    let role = Role::parse(&role)
        .ok_or_else(|| DomainError::database(format!("Invalid chat role: {}", role)))?;
    let metadata: Option<Json<Value>> = column(row, "metadata")?;
    let created_at: DateTime<Utc> = column(row, "created_at")?;

    Ok(ChatMessage {
        id: ChatMessageId::from_uuid(column(row, "id")?),
        session_id: ChatSessionId::from_uuid(column(row, "session_id")?),
        role,
        content: column(row, "content")?,
        metadata: metadata.map(|m| m.0),
        created_at: Timestamp::from_datetime(created_at),
    })
}
