//! Authentication: credential verification and bearer token sessions.

use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::repositories::{SessionRepository, UserRepository};
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Random bytes per session token before base64 encoding.
const TOKEN_LENGTH_BYTES: usize = 24;

/// A verified identity attached to authenticated requests.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub email: String,
}

/// Service that verifies credentials and manages bearer token sessions.
///
/// Passwords and session tokens are both hashed with HMAC-SHA256 keyed by
/// `signing_secret` before storage or comparison. An attacker with read-only
/// access to the database cannot verify or forge either without the
/// server-side secret.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    signing_secret: String,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// `signing_secret` must match the value used when accounts were created.
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        signing_secret: String,
    ) -> Self {
        Self {
            users,
            sessions,
            signing_secret,
        }
    }

    /// Verifies credentials and opens a session.
    ///
    /// On success returns the raw bearer token (shown to the caller exactly
    /// once) and the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for an unknown email or wrong
    /// password; the message does not reveal which.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(String, AuthenticatedUser), AppError> {
        let invalid =
            || AppError::unauthorized("Invalid email or password", json!({}));

        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(invalid)?;

        if hash_with_secret(&self.signing_secret, password) != user.password_hash {
            return Err(invalid());
        }

        let token = generate_token();
        self.sessions
            .create(&hash_with_secret(&self.signing_secret, &token), user.id)
            .await?;

        Ok((
            token,
            AuthenticatedUser {
                id: user.id,
                email: user.email,
            },
        ))
    }

    /// Authenticates a raw bearer token.
    ///
    /// On success refreshes the session's `last_used_at` timestamp
    /// (best-effort) and returns the owning user id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if no session matches the token.
    pub async fn authenticate(&self, token: &str) -> Result<i64, AppError> {
        let token_hash = hash_with_secret(&self.signing_secret, token);

        let user_id = self
            .sessions
            .find_user_id(&token_hash)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized("Unauthorized", json!({ "reason": "Invalid token" }))
            })?;

        let _ = self.sessions.touch(&token_hash).await;

        Ok(user_id)
    }
}

/// Hashes an input with HMAC-SHA256 using the server signing secret.
///
/// Returns a 64-character lowercase hex-encoded MAC. Shared by the service
/// and the admin CLI, which seeds accounts with the same scheme.
pub fn hash_with_secret(secret: &str, input: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(input.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Generates an opaque URL-safe session token.
fn generate_token() -> String {
    let mut buffer = [0u8; TOKEN_LENGTH_BYTES];
    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::User;
    use crate::domain::repositories::{MockSessionRepository, MockUserRepository};
    use chrono::Utc;

    const SECRET: &str = "test-signing-secret";

    fn test_user(password: &str) -> User {
        User {
            id: 1,
            email: "owner@example.com".to_string(),
            password_hash: hash_with_secret(SECRET, password),
            created_at: Utc::now(),
        }
    }

    fn service(users: MockUserRepository, sessions: MockSessionRepository) -> AuthService {
        AuthService::new(Arc::new(users), Arc::new(sessions), SECRET.to_string())
    }

    #[tokio::test]
    async fn test_login_success_issues_token_and_session() {
        let mut users = MockUserRepository::new();
        let mut sessions = MockSessionRepository::new();

        users
            .expect_find_by_email()
            .withf(|email| email == "owner@example.com")
            .times(1)
            .returning(|_| Ok(Some(test_user("hunter2-but-longer"))));
        sessions
            .expect_create()
            .withf(|token_hash, user_id| token_hash.len() == 64 && *user_id == 1)
            .times(1)
            .returning(|_, _| Ok(()));

        let (token, user) = service(users, sessions)
            .login("owner@example.com", "hunter2-but-longer")
            .await
            .unwrap();

        assert_eq!(token.len(), 32);
        assert_eq!(user.id, 1);
        assert_eq!(user.email, "owner@example.com");
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_unauthorized() {
        let mut users = MockUserRepository::new();
        let mut sessions = MockSessionRepository::new();

        users
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(test_user("correct-password"))));
        sessions.expect_create().times(0);

        let result = service(users, sessions)
            .login("owner@example.com", "wrong-password")
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::Unauthorized { .. }
        ));
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_unauthorized() {
        let mut users = MockUserRepository::new();
        let mut sessions = MockSessionRepository::new();

        users
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        sessions.expect_create().times(0);

        let result = service(users, sessions)
            .login("nobody@example.com", "whatever")
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::Unauthorized { .. }
        ));
    }

    #[tokio::test]
    async fn test_authenticate_success_touches_session() {
        let mut users = MockUserRepository::new();
        let mut sessions = MockSessionRepository::new();

        let expected_hash = hash_with_secret(SECRET, "raw-token");

        let hash_for_find = expected_hash.clone();
        sessions
            .expect_find_user_id()
            .withf(move |hash| hash == &hash_for_find)
            .times(1)
            .returning(|_| Ok(Some(42)));
        sessions
            .expect_touch()
            .withf(move |hash| hash == &expected_hash)
            .times(1)
            .returning(|_| Ok(()));

        users.expect_find_by_email().times(0);

        let user_id = service(users, sessions)
            .authenticate("raw-token")
            .await
            .unwrap();

        assert_eq!(user_id, 42);
    }

    #[tokio::test]
    async fn test_authenticate_unknown_token_is_unauthorized() {
        let users = MockUserRepository::new();
        let mut sessions = MockSessionRepository::new();

        sessions
            .expect_find_user_id()
            .times(1)
            .returning(|_| Ok(None));
        sessions.expect_touch().times(0);

        let result = service(users, sessions).authenticate("stale-token").await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::Unauthorized { .. }
        ));
    }

    #[tokio::test]
    async fn test_authenticate_touch_failure_is_ignored() {
        let users = MockUserRepository::new();
        let mut sessions = MockSessionRepository::new();

        sessions
            .expect_find_user_id()
            .times(1)
            .returning(|_| Ok(Some(7)));
        sessions
            .expect_touch()
            .times(1)
            .returning(|_| Err(AppError::internal("db hiccup", json!({}))));

        let user_id = service(users, sessions)
            .authenticate("raw-token")
            .await
            .unwrap();

        assert_eq!(user_id, 7);
    }

    #[test]
    fn test_hash_is_deterministic_and_secret_dependent() {
        let h1 = hash_with_secret("secret-a", "input");
        let h2 = hash_with_secret("secret-a", "input");
        let h3 = hash_with_secret("secret-b", "input");

        assert_eq!(h1, h2);
        assert_ne!(h1, h3);
        assert_eq!(h1.len(), 64);
    }

    #[test]
    fn test_generated_tokens_are_unique() {
        let t1 = generate_token();
        let t2 = generate_token();

        assert_ne!(t1, t2);
        assert_eq!(t1.len(), 32);
        assert!(!t1.contains('='));
    }
}
