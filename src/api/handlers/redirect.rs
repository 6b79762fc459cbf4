//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use metrics::counter;
use std::net::SocketAddr;
use tracing::{debug, error};

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its destination URL.
///
/// # Endpoint
///
/// `GET /{code}` (public)
///
/// # Request Flow
///
/// 1. Check cache for the destination (only expiry-free links are ever cached)
/// 2. On cache miss, resolve through the link service (404 unknown, 410 expired)
/// 3. Asynchronously fill the cache when the link has no expiry
/// 4. Send a click event to the background worker
/// 5. Return 302 Found with the stored destination
///
/// # Click Tracking
///
/// Click events go onto a bounded channel with `try_send`; if the queue is
/// full the event is dropped. Tracking never delays the redirect and its
/// failures never reach the client.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 410 Gone if the link's expiry timestamp has passed; the click
/// counter is not incremented and no event is recorded.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
) -> Result<Response, AppError> {
    let destination = match state.cache.get_url(&code).await {
        Ok(Some(cached_url)) => {
            debug!("Cache HIT for {}", code);
            cached_url
        }
        Ok(None) => {
            debug!("Cache MISS for {}", code);

            let link = state.link_service.resolve(&code).await?;

            // Expiring links always resolve against the store so the expiry
            // policy is re-evaluated on every hit.
            if link.expires_at.is_none() {
                let cache = state.cache.clone();
                let cache_code = code.clone();
                let url = link.long_url.clone();
                tokio::spawn(async move {
                    if let Err(e) = cache.set_url(&cache_code, &url, None).await {
                        error!("Failed to cache destination: {}", e);
                    }
                });
            }

            link.long_url
        }
        Err(e) => {
            error!("Cache error: {}", e);

            let link = state.link_service.resolve(&code).await?;
            link.long_url
        }
    };

    let click_event = ClickEvent::new(
        code,
        Some(addr.ip().to_string()),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
    );

    if state.click_tx.try_send(click_event).is_err() {
        debug!("Click queue full; event dropped");
    }

    counter!("redirects_total").increment(1);

    Ok((StatusCode::FOUND, [(header::LOCATION, destination)]).into_response())
}
