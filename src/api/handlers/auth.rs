//! Handler for login.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::auth::{LoginRequest, LoginResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Verifies credentials and issues an opaque bearer token.
///
/// # Endpoint
///
/// `POST /auth/login` (public, strictly rate-limited)
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed request body.
/// Returns 401 Unauthorized for unknown email or wrong password, without
/// revealing which one was wrong.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    payload.validate()?;

    let (token, user) = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(LoginResponse::new(token, user)))
}
