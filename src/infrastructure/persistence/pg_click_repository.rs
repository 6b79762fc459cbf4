//! PostgreSQL implementation of the click event log.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// PostgreSQL repository for click events.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn record(&self, new_click: NewClick) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO link_clicks (link_id, device, browser, os, referrer, ip) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(new_click.link_id)
        .bind(&new_click.device)
        .bind(&new_click.browser)
        .bind(&new_click.os)
        .bind(&new_click.referrer)
        .bind(&new_click.ip)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn list_for_link(&self, link_id: i64) -> Result<Vec<Click>, AppError> {
        let clicks = sqlx::query_as::<_, Click>(
            "SELECT id, link_id, clicked_at, device, browser, os, referrer, ip \
             FROM link_clicks WHERE link_id = $1",
        )
        .bind(link_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(clicks)
    }

    async fn delete_for_link(&self, link_id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM link_clicks WHERE link_id = $1")
            .bind(link_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }
}
