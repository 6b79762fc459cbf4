//! Background worker for asynchronous click tracking.
//!
//! The redirect handler enqueues [`ClickEvent`]s on a bounded channel and
//! returns immediately; this worker is the only consumer. Every failure in
//! here is logged and swallowed: the redirect has already been sent, so
//! nothing can (or should) be reported back to the client, and tracking
//! writes are never retried.

use std::sync::Arc;

use metrics::counter;
use serde_json::json;
use tokio::sync::mpsc;

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::NewClick;
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;
use crate::utils::user_agent::classify;

/// Referrer value stored when the request carried no Referer header.
pub const DIRECT_REFERRER: &str = "Direct";

/// Consumes click events until the channel closes.
///
/// For each event: resolves the code to a link, bumps the click counter,
/// classifies the User-Agent, and appends a click record. The counter bump
/// and the event append are independent best-effort writes; either may fail
/// alone and the discrepancy is tolerated by the analytics reader.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    links: Arc<dyn LinkRepository>,
    clicks: Arc<dyn ClickRepository>,
) {
    while let Some(event) = rx.recv().await {
        let code = event.code.clone();
        match track(links.as_ref(), clicks.as_ref(), event).await {
            Ok(()) => {
                counter!("clicks_recorded_total").increment(1);
            }
            Err(e) => {
                counter!("clicks_failed_total").increment(1);
                tracing::warn!(error = %e, code, "Click tracking failed; event dropped");
            }
        }
    }

    tracing::info!("Click worker stopped: channel closed");
}

async fn track(
    links: &dyn LinkRepository,
    clicks: &dyn ClickRepository,
    event: ClickEvent,
) -> Result<(), AppError> {
    let link = links.find_by_code(&event.code).await?.ok_or_else(|| {
        AppError::not_found(
            "Link disappeared before its click was recorded",
            json!({ "code": event.code }),
        )
    })?;

    links.increment_clicks(link.id).await?;

    let client = classify(event.user_agent.as_deref());

    clicks
        .record(NewClick {
            link_id: link.id,
            device: client.device,
            browser: client.browser,
            os: client.os,
            referrer: event
                .referrer
                .unwrap_or_else(|| DIRECT_REFERRER.to_string()),
            ip: event.ip,
        })
        .await
}
