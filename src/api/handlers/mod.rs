//! REST API handlers.

mod analytics;
mod auth;
mod health;
mod links;
mod redirect;

pub use analytics::link_analytics_handler;
pub use auth::login_handler;
pub use health::health_handler;
pub use links::{create_link_handler, delete_link_handler, list_links_handler};
pub use redirect::redirect_handler;
