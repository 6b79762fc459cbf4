//! Short code generation and alias validation utilities.
//!
//! Provides cryptographically secure random code generation and validation
//! for caller-chosen custom aliases.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::json;

use crate::error::AppError;

/// Length of generated short codes.
const CODE_LENGTH: usize = 6;

/// URL-safe alphabet for generated codes. 64 symbols, so reducing a random
/// byte modulo the alphabet size introduces no bias.
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Allowed shape for custom aliases.
static ALIAS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").unwrap());

/// Route words that cannot be claimed as aliases.
///
/// Reserved for system endpoints to prevent routing conflicts.
const RESERVED_ALIASES: &[&str] = &["links", "auth", "health", "api", "admin", "analytics"];

/// Generates a cryptographically secure random 6-character short code.
///
/// Uses `getrandom` for entropy; output characters are drawn from a 64-symbol
/// URL-safe alphabet.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_code() -> String {
    let mut buffer = [0u8; CODE_LENGTH];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    buffer
        .iter()
        .map(|&b| ALPHABET[(b % 64) as usize] as char)
        .collect()
}

/// Validates a caller-chosen custom alias.
///
/// # Rules
///
/// - Length: 4-30 characters
/// - Allowed characters: lowercase letters, digits, hyphens
/// - Cannot start or end with a hyphen
/// - Cannot be a reserved route word
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_alias(alias: &str) -> Result<(), AppError> {
    if alias.len() < 4 || alias.len() > 30 {
        return Err(AppError::bad_request(
            "Custom alias must be 4-30 characters",
            json!({ "provided_length": alias.len() }),
        ));
    }

    if !ALIAS_REGEX.is_match(alias) {
        return Err(AppError::bad_request(
            "Custom alias can only contain lowercase letters, digits, and hyphens",
            json!({ "alias": alias }),
        ));
    }

    if alias.starts_with('-') || alias.ends_with('-') {
        return Err(AppError::bad_request(
            "Custom alias cannot start or end with a hyphen",
            json!({ "alias": alias }),
        ));
    }

    if RESERVED_ALIASES.contains(&alias) {
        return Err(AppError::bad_request(
            "This alias is reserved",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}
