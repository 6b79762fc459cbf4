//! Liveness endpoint.

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::state::AppState;

/// Reports service and cache status.
///
/// # Endpoint
///
/// `GET /health` (public)
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let cache_ok = state.cache.health_check().await;

    Json(json!({
        "status": "ok",
        "cache": if cache_ok { "ok" } else { "unavailable" },
    }))
}
