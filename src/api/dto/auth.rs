//! DTOs for the login endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::AuthenticatedUser;

/// Login request body.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Public view of an authenticated user.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub email: String,
}

/// Login response: the opaque bearer token plus the user it belongs to.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

impl LoginResponse {
    pub fn new(token: String, user: AuthenticatedUser) -> Self {
        Self {
            token,
            user: UserInfo {
                id: user.id,
                email: user.email,
            },
        }
    }
}
