//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL owned by a user.
///
/// `code` is the single redirect namespace: it holds either a generated token
/// or the caller-chosen alias, and is globally unique. `alias` keeps the
/// caller's label when one was supplied.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub alias: Option<String>,
    pub long_url: String,
    pub user_id: i64,
    pub clicks: i64,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| Utc::now() >= e)
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub code: String,
    pub alias: Option<String>,
    pub long_url: String,
    pub user_id: i64,
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn test_link(expires_at: Option<DateTime<Utc>>) -> Link {
        Link {
            id: 1,
            code: "abc123".to_string(),
            alias: None,
            long_url: "https://example.com".to_string(),
            user_id: 7,
            clicks: 0,
            expires_at,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_link_without_expiry_is_not_expired() {
        assert!(!test_link(None).is_expired());
    }

    #[test]
    fn test_link_with_future_expiry_is_not_expired() {
        let link = test_link(Some(Utc::now() + Duration::hours(1)));
        assert!(!link.is_expired());
    }

    #[test]
    fn test_link_with_past_expiry_is_expired() {
        let link = test_link(Some(Utc::now() - Duration::seconds(1)));
        assert!(link.is_expired());
    }

    #[test]
    fn test_new_link_carries_alias_into_code() {
        let new_link = NewLink {
            code: "promo".to_string(),
            alias: Some("promo".to_string()),
            long_url: "https://rust-lang.org".to_string(),
            user_id: 42,
            expires_at: None,
        };

        assert_eq!(new_link.code, new_link.alias.clone().unwrap());
    }
}
