//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;

/// Request to create a short link.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    /// The destination URL (must be a valid absolute URL).
    #[validate(url(message = "Invalid URL"))]
    pub original_url: String,

    /// Optional caller-chosen alias; claims the redirect namespace entry for
    /// this link. Shape rules are enforced by the link service.
    pub custom_alias: Option<String>,

    /// Optional expiry timestamp (RFC3339). After this time, the link
    /// returns 410 Gone. Accepted verbatim, including past timestamps.
    pub expires_at: Option<DateTime<Utc>>,
}

/// JSON representation of a link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: i64,
    pub code: String,
    pub custom_alias: Option<String>,
    pub original_url: String,
    pub short_url: String,
    pub clicks: i64,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    /// Builds the wire representation from an entity and its public short URL.
    pub fn from_link(link: Link, short_url: String) -> Self {
        Self {
            id: link.id,
            code: link.code,
            custom_alias: link.alias,
            original_url: link.long_url,
            short_url,
            clicks: link.clicks,
            expires_at: link.expires_at,
            created_at: link.created_at,
        }
    }
}

/// Response for `GET /links`: one page plus pagination metadata.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLinksResponse {
    pub links: Vec<LinkResponse>,
    pub total_pages: i64,
    pub current_page: i64,
}
