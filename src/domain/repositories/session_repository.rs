//! Repository trait for bearer token sessions.

use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for login sessions.
///
/// Sessions are stored by the HMAC of the opaque bearer token; the raw token
/// never touches the database.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Stores a new session for a user.
    async fn create(&self, token_hash: &str, user_id: i64) -> Result<(), AppError>;

    /// Resolves a token hash to the owning user id.
    async fn find_user_id(&self, token_hash: &str) -> Result<Option<i64>, AppError>;

    /// Refreshes the session's `last_used_at` timestamp.
    ///
    /// Best-effort: callers ignore failures.
    async fn touch(&self, token_hash: &str) -> Result<(), AppError>;
}
