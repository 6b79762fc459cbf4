//! Repository trait for user accounts.

use crate::domain::entities::User;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user accounts.
///
/// Credential verification itself lives in
/// [`crate::application::services::AuthService`]; this trait only moves
/// records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Creates a user with an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the email is already registered.
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, AppError>;

    /// Lists all users, oldest first.
    async fn list(&self) -> Result<Vec<User>, AppError>;
}
