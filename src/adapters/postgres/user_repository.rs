//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, db_error, is_unique_violation};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::{Email, OAuthLink, PasswordHash, User};
use crate::ports::UserRepository;

const USER_COLUMNS: &str = "id, email, full_name, password_hash, oauth_provider, oauth_subject, \
                            avatar_url, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(
        &self,
        predicate: &str,
        binds: &[&str],
    ) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE {}", USER_COLUMNS, predicate);
        let mut query = sqlx::query(&sql);
        for value in binds {
            query = query.bind(*value);
        }
        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch user"))?;
        row.as_ref().map(row_to_user).transpose()
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let oauth = user.oauth.as_ref();
        sqlx::query(
            r#"
            INSERT INTO users (
                id, email, full_name, password_hash, oauth_provider, oauth_subject,
                avatar_url, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.full_name.as_deref())
        .bind(user.password_hash.as_ref().map(|h| h.as_str()))
        .bind(oauth.map(|o| o.provider.as_str()))
        .bind(oauth.map(|o| o.subject.as_str()))
        .bind(user.avatar_url.as_deref())
        .bind(user.created_at.as_datetime())
        .bind(user.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::new(ErrorCode::EmailAlreadyRegistered, "Email already registered")
            } else {
                db_error("insert user")(e)
            }
        })?;

        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let oauth = user.oauth.as_ref();
        let result = sqlx::query(
            r#"
            UPDATE users SET
                full_name = $2,
                password_hash = $3,
                oauth_provider = $4,
                oauth_subject = $5,
                avatar_url = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.full_name.as_deref())
        .bind(user.password_hash.as_ref().map(|h| h.as_str()))
        .bind(oauth.map(|o| o.provider.as_str()))
        .bind(oauth.map(|o| o.subject.as_str()))
        .bind(user.avatar_url.as_deref())
        .bind(user.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("update user"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::UserNotFound,
                format!("User not found: {}", user.id),
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch user"))?;
        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        self.fetch_one_where("email = $1", &[email.as_str()]).await
    }

    async fn find_by_oauth(
        &self,
        provider: &str,
        subject: &str,
    ) -> Result<Option<User>, DomainError> {
        self.fetch_one_where("oauth_provider = $1 AND oauth_subject = $2", &[provider, subject])
            .await
    }
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let email: String = column(row, "email")?;
    let email = Email::parse(&email)
        .map_err(|e| DomainError::database(format!("Invalid stored email: {}", e)))?;
    let provider: Option<String> = column(row, "oauth_provider")?;
    let subject: Option<String> = column(row, "oauth_subject")?;
    let password_hash: Option<String> = column(row, "password_hash")?;
    let created_at: DateTime<Utc> = column(row, "created_at")?;
    let updated_at: DateTime<Utc> = column(row, "updated_at")?;

    Ok(User {
        id: UserId::from_uuid(column(row, "id")?),
        email,
        full_name: column(row, "full_name")?,
        password_hash: password_hash.map(PasswordHash::from_stored),
        oauth: provider
            .zip(subject)
            .map(|(provider, subject)| OAuthLink { provider, subject }),
        avatar_url: column(row, "avatar_url")?,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}
