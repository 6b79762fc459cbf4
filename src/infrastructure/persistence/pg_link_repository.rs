//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str = "id, code, alias, long_url, user_id, clicks, expires_at, created_at";

/// PostgreSQL repository for link storage and retrieval.
///
/// Uses parameterized statements throughout; the unique constraint on `code`
/// is the source of truth for namespace collisions, surfaced to callers as
/// validation errors via the [`AppError`] sqlx mapping.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Escapes LIKE wildcards in a user-supplied needle and wraps it for a
/// substring match.
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let link = sqlx::query_as::<_, Link>(&format!(
            "INSERT INTO links (code, alias, long_url, user_id, expires_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {LINK_COLUMNS}"
        ))
        .bind(&new_link.code)
        .bind(&new_link.alias)
        .bind(&new_link.long_url)
        .bind(new_link.user_id)
        .bind(new_link.expires_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE code = $1"
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_by_id_for_user(&self, id: i64, user_id: i64) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn list_for_user(
        &self,
        user_id: i64,
        search: Option<String>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Link>, AppError> {
        let pattern = search.as_deref().map(like_pattern);

        let links = sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM links \
             WHERE user_id = $1 \
               AND ($2::text IS NULL OR long_url ILIKE $2 OR code ILIKE $2 OR alias ILIKE $2) \
             ORDER BY created_at DESC \
             LIMIT $3 OFFSET $4"
        ))
        .bind(user_id)
        .bind(pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(links)
    }

    async fn count_for_user(
        &self,
        user_id: i64,
        search: Option<String>,
    ) -> Result<i64, AppError> {
        let pattern = search.as_deref().map(like_pattern);

        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM links \
             WHERE user_id = $1 \
               AND ($2::text IS NULL OR long_url ILIKE $2 OR code ILIKE $2 OR alias ILIKE $2)",
        )
        .bind(user_id)
        .bind(pattern)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn increment_clicks(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE links SET clicks = clicks + 1 WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
