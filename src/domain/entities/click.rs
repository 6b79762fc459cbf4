//! Click entity representing a single redirect event.

use chrono::{DateTime, Utc};

/// A click recorded when a shortened link is accessed.
///
/// Immutable once created. Client attributes are already classified at
/// insertion time: `device`, `browser`, and `os` carry "Unknown" when the
/// User-Agent was missing or unparseable, and `referrer` carries "Direct"
/// when the request had no Referer header.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Click {
    pub id: i64,
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub device: String,
    pub browser: String,
    pub os: String,
    pub referrer: String,
    pub ip: Option<String>,
}

/// Input data for recording a new click event.
///
/// The `link_id` must reference an existing link; the timestamp is set by
/// the database at insertion time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClick {
    pub link_id: i64,
    pub device: String,
    pub browser: String,
    pub os: String,
    pub referrer: String,
    pub ip: Option<String>,
}
