//! Request and response DTOs for the REST API.

pub mod analytics;
pub mod auth;
pub mod links;
pub mod pagination;
