//! Application services orchestrating domain operations.

mod analytics_service;
mod auth_service;
mod link_service;

pub use analytics_service::{AnalyticsService, CategoryCount, DailyClicks, LinkAnalytics};
pub use auth_service::{AuthService, AuthenticatedUser, hash_with_secret};
pub use link_service::{LinkPage, LinkService};
