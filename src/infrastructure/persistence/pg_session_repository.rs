//! PostgreSQL implementation of session repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewSession, SessionRecord, User};
use crate::domain::repositories::SessionRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct SessionRow {
    token_hash: String,
    expires_at: DateTime<Utc>,
    user_id: i64,
    username: String,
    password_hash: String,
    is_admin: bool,
}

impl From<SessionRow> for SessionRecord {
    fn from(row: SessionRow) -> Self {
        SessionRecord {
            token_hash: row.token_hash,
            user: User::new(row.user_id, row.username, row.password_hash, row.is_admin),
            expires_at: row.expires_at,
        }
    }
}

/// PostgreSQL repository for login sessions.
///
/// Stores token hashes only. Lookups join the owning user in the same query.
pub struct PgSessionRepository {
    pool: Arc<PgPool>,
}

impl PgSessionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn create(&self, new_session: NewSession) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (token_hash, user_id, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&new_session.token_hash)
        .bind(new_session.user_id)
        .bind(new_session.expires_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn find_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<SessionRecord>, AppError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT s.token_hash, s.expires_at,
                   u.id AS user_id, u.username, u.password_hash, u.is_admin
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token_hash = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(SessionRecord::from))
    }

    async fn delete(&self, token_hash: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
            .bind(token_hash)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
