//! Handler for link analytics.

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::api::dto::analytics::AnalyticsResponse;
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the aggregated click analytics for one of the caller's links.
///
/// # Endpoint
///
/// `GET /links/{id}/analytics`
///
/// # Response
///
/// Link metadata plus `totalClicks` (from the link's counter), `clicksData`
/// (per-day counts, ascending by date, days without clicks omitted), and
/// `deviceData`/`browserData` categorical breakdowns.
///
/// # Errors
///
/// Returns 404 Not Found if the link doesn't exist or is owned by another
/// user.
pub async fn link_analytics_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let summary = state.analytics_service.summarize(user_id, id).await?;

    let short_url = state.link_service.short_url(&summary.link.code);

    Ok(Json(AnalyticsResponse::from_summary(summary, short_url)))
}
