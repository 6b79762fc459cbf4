//! Shared application state for request handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{AnalyticsService, AuthService, LinkService};
use crate::domain::click_event::ClickEvent;
use crate::infrastructure::cache::CacheService;

/// State shared across all request handlers.
///
/// Cloned per request by Axum; all members are cheap handles.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub analytics_service: Arc<AnalyticsService>,
    pub auth_service: Arc<AuthService>,
    pub cache: Arc<dyn CacheService>,
    pub click_tx: mpsc::Sender<ClickEvent>,
}
