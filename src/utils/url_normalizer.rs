//! URL validation and normalization.
//!
//! Normalization is deliberately shallow: surrounding whitespace is trimmed
//! and nothing else. `https://Example.com` and `https://example.com/` are
//! distinct originals and get distinct codes.

use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("URL is empty")]
    Empty,
    #[error("Invalid URL: {0}")]
    Malformed(String),
    #[error("URL must be absolute with a scheme and host")]
    MissingHost,
}

/// Validates `input` as an absolute URL and returns its normalized form.
///
/// # Errors
///
/// Returns [`UrlError`] if the trimmed input is empty, does not parse, or has
/// no host component.
pub fn normalize_url(input: &str) -> Result<String, UrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let parsed = Url::parse(trimmed).map_err(|e| UrlError::Malformed(e.to_string()))?;

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(trimmed.to_string()),
        _ => Err(UrlError::MissingHost),
    }
}
