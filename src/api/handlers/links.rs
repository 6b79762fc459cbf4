//! Handlers for link management endpoints (create, list, delete).

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::links::{CreateLinkRequest, LinkResponse, ListLinksResponse};
use crate::api::dto::pagination::ListQuery;
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link owned by the authenticated user.
///
/// # Endpoint
///
/// `POST /links`
///
/// # Request Body
///
/// ```json
/// {
///   "originalUrl": "https://example.com/page",
///   "customAlias": "promo",                  // optional
///   "expiresAt": "2026-12-31T23:59:59Z"      // optional
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed destination URL, an invalid
/// alias, or an alias already in use by any link.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_link(
            user_id,
            payload.original_url,
            payload.custom_alias,
            payload.expires_at,
        )
        .await?;

    let short_url = state.link_service.short_url(&link.code);

    Ok((
        StatusCode::CREATED,
        Json(LinkResponse::from_link(link, short_url)),
    ))
}

/// Lists the authenticated user's links, newest first.
///
/// # Endpoint
///
/// `GET /links?page=&limit=&search=`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `limit` (optional): Items per page (default: 10, max: 100)
/// - `search` (optional): Case-insensitive substring matched against the
///   destination URL, code, and alias
///
/// # Errors
///
/// Returns 400 Bad Request if pagination parameters are invalid.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Query(params): Query<ListQuery>,
) -> Result<Json<ListLinksResponse>, AppError> {
    let (page, limit) = params
        .validate_page_and_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let page_result = state
        .link_service
        .list_links(user_id, params.search_term(), page, limit)
        .await?;

    let links = page_result
        .links
        .into_iter()
        .map(|link| {
            let short_url = state.link_service.short_url(&link.code);
            LinkResponse::from_link(link, short_url)
        })
        .collect();

    Ok(Json(ListLinksResponse {
        links,
        total_pages: page_result.total_pages,
        current_page: page_result.current_page,
    }))
}

/// Deletes a link and all of its click events.
///
/// # Endpoint
///
/// `DELETE /links/{id}`
///
/// # Behavior
///
/// Click events and the link row disappear together from the caller's
/// perspective; the cache entry for the code is invalidated immediately.
///
/// # Errors
///
/// Returns 404 Not Found if the link doesn't exist or is owned by another
/// user.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(user_id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
