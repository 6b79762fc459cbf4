//! PostgreSQL implementation of the session repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::SessionRepository;
use crate::error::AppError;

/// PostgreSQL repository for bearer token sessions.
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
    async fn create(&self, token_hash: &str, user_id: i64) -> Result<(), AppError> {
        sqlx::query("INSERT INTO sessions (token_hash, user_id) VALUES ($1, $2)")
            .bind(token_hash)
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn find_user_id(&self, token_hash: &str) -> Result<Option<i64>, AppError> {
        let user_id = sqlx::query_scalar::<_, i64>(
            "SELECT user_id FROM sessions WHERE token_hash = $1",
        )
        .bind(token_hash)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(user_id)
    }

    async fn touch(&self, token_hash: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE sessions SET last_used_at = now() WHERE token_hash = $1")
            .bind(token_hash)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
