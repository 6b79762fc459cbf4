//! Repository trait for the append-only click event log.

use crate::domain::entities::{Click, NewClick};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for click events.
///
/// Events are append-only: recorded by the background click worker and
/// removed only in bulk when their parent link is deleted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Appends one click event. The timestamp is set at insertion time.
    async fn record(&self, new_click: NewClick) -> Result<(), AppError>;

    /// Returns all click events for a link, in no particular order.
    async fn list_for_link(&self, link_id: i64) -> Result<Vec<Click>, AppError>;

    /// Deletes all click events for a link, returning the number removed.
    async fn delete_for_link(&self, link_id: i64) -> Result<u64, AppError>;
}
