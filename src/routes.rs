//! Router assembly.
//!
//! Public surface: the redirect, login, and liveness endpoints. Everything
//! under `/links` requires a bearer token via
//! [`crate::api::middleware::auth`].

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{
    create_link_handler, delete_link_handler, health_handler, link_analytics_handler,
    list_links_handler, login_handler, redirect_handler,
};
use crate::api::middleware::{auth, rate_limit};
use crate::state::AppState;

/// Builds the full application router.
///
/// # Endpoints
///
/// - `GET    /health`                - Liveness (public)
/// - `POST   /auth/login`            - Credential login (public, strict rate limit)
/// - `POST   /links`                 - Create a short link
/// - `GET    /links`                 - List own links (paginated, searchable)
/// - `GET    /links/{id}/analytics`  - Aggregated click analytics
/// - `DELETE /links/{id}`            - Delete a link and its click events
/// - `GET    /{code}`                - Redirect (public, rate-limited)
///
/// The redirect route is registered last; static routes take precedence over
/// the `{code}` capture.
pub fn app_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/links", post(create_link_handler).get(list_links_handler))
        .route("/links/{id}", delete(delete_link_handler))
        .route("/links/{id}/analytics", get(link_analytics_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/auth/login",
            post(login_handler).layer(rate_limit::secure_layer()),
        )
        .merge(protected)
        .route("/{code}", get(redirect_handler).layer(rate_limit::layer()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
