//! Syntactic validation of submitted long URLs.
//!
//! Only the shape of the URL is checked. Nothing is fetched.

use std::fmt;

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL is empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS URLs are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,
}

/// A long URL that passed [`validate`].
///
/// Holds the parser's serialization, so `http://example.com` becomes
/// `http://example.com/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUrl(String);

impl ValidatedUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ValidatedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Accepts well-formed absolute `http`/`https` URLs with a host.
///
/// Surrounding whitespace is ignored. Schemes like `javascript:` or `data:`
/// are rejected since the result ends up in a `Location` header.
///
/// # Errors
///
/// Returns the first rule the candidate violates.
///
/// # Examples
///
/// ```ignore
/// assert!(validate("http://example.com").is_ok());
/// assert!(validate("not a url").is_err());
/// assert!(validate("").is_err());
/// ```
pub fn validate(candidate: &str) -> Result<ValidatedUrl, UrlValidationError> {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlValidationError::MissingHost),
    }

    Ok(ValidatedUrl(url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert_eq!(
            validate("http://example.com").unwrap().as_str(),
            "http://example.com/"
        );
        assert_eq!(
            validate("https://www.google.com/search?q=rust").unwrap().as_str(),
            "https://www.google.com/search?q=rust"
        );
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(
            validate("  https://example.com/path \n").unwrap().as_str(),
            "https://example.com/path"
        );
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(validate(""), Err(UrlValidationError::Empty));
        assert_eq!(validate("   "), Err(UrlValidationError::Empty));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(matches!(
            validate("not a url"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(matches!(
            validate("example.com"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(validate("http://").is_err());
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert_eq!(
            validate("javascript:alert(1)"),
            Err(UrlValidationError::UnsupportedProtocol)
        );
        assert_eq!(
            validate("ftp://files.example.com/x"),
            Err(UrlValidationError::UnsupportedProtocol)
        );
        assert_eq!(
            validate("mailto:someone@example.com"),
            Err(UrlValidationError::UnsupportedProtocol)
        );
    }
}
