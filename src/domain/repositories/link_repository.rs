//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// The `code` column is the single lookup namespace for redirects: it holds
/// generated codes and caller-chosen aliases alike, so one uniqueness
/// constraint covers both.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the code or alias is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code (the redirect namespace).
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by id, scoped to its owner.
    ///
    /// Returns `Ok(None)` when the link does not exist or belongs to a
    /// different user; callers cannot distinguish the two cases.
    async fn find_by_id_for_user(&self, id: i64, user_id: i64) -> Result<Option<Link>, AppError>;

    /// Lists a user's links, newest first.
    ///
    /// `search` is a case-insensitive substring matched against the
    /// destination URL, code, and alias. `offset`/`limit` select the page.
    async fn list_for_user(
        &self,
        user_id: i64,
        search: Option<String>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Link>, AppError>;

    /// Counts a user's links under the same `search` filter as [`Self::list_for_user`].
    async fn count_for_user(&self, user_id: i64, search: Option<String>)
    -> Result<i64, AppError>;

    /// Permanently deletes a link row.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// Atomically increments the link's click counter.
    ///
    /// Single-statement UPDATE; concurrent increments are individually atomic
    /// but not ordered with respect to each other.
    async fn increment_clicks(&self, id: i64) -> Result<(), AppError>;
}
