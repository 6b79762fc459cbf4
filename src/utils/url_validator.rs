//! Destination URL validation.
//!
//! Destinations are validated at creation time and stored verbatim: a
//! redirect must return exactly the URL the caller registered.

use url::Url;

/// Errors that can occur while validating a destination URL.
#[derive(Debug, thiserror::Error)]
pub enum DestinationUrlError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedScheme,
}

/// Checks that `input` parses as an absolute HTTP(S) URL.
///
/// Rejects dangerous or unroutable schemes like `javascript:`, `data:`, and
/// `file:`. The input itself is not modified in any way.
///
/// # Errors
///
/// Returns [`DestinationUrlError::InvalidFormat`] for malformed URLs.
/// Returns [`DestinationUrlError::UnsupportedScheme`] for non-HTTP(S) schemes.
pub fn validate_destination(input: &str) -> Result<(), DestinationUrlError> {
    let url =
        Url::parse(input).map_err(|e| DestinationUrlError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(DestinationUrlError::UnsupportedScheme),
    }
}
