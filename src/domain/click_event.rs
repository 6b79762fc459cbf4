//! Click event model for asynchronous click tracking.

/// An in-memory representation of a click event for async processing.
///
/// Used to pass click information from the redirect handler to the background
/// worker via a channel. This decouples the HTTP response from database
/// writes, allowing fast redirects without blocking.
///
/// # Design
///
/// - Carries the short code rather than a link id, so the handler can enqueue
///   an event even when the redirect was served from cache
/// - All client metadata is optional to handle missing headers gracefully
/// - Cloneable for sending across async boundaries
///
/// # Usage Flow
///
/// 1. Created in the redirect handler with request metadata
/// 2. Sent to the channel (non-blocking, dropped if the queue is full)
/// 3. Processed by [`crate::domain::click_worker::run_click_worker`]
/// 4. Converted to [`crate::domain::entities::NewClick`] for persistence
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub code: String,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub ip: Option<String>,
}

impl ClickEvent {
    /// Creates a new click event.
    ///
    /// # Arguments
    ///
    /// - `code` - The short code that was accessed
    /// - `ip` - Optional client IP address
    /// - `user_agent` - Optional User-Agent header
    /// - `referrer` - Optional Referer header
    pub fn new(
        code: String,
        ip: Option<String>,
        user_agent: Option<&str>,
        referrer: Option<&str>,
    ) -> Self {
        Self {
            code,
            ip,
            user_agent: user_agent.map(|s| s.to_string()),
            referrer: referrer.map(|s| s.to_string()),
        }
    }
}
