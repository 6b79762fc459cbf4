//! User account entity.

use chrono::{DateTime, Utc};

/// An account that owns shortened links.
///
/// `password_hash` is a hex-encoded HMAC-SHA256 of the password, keyed by the
/// server signing secret. It never leaves the service.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
