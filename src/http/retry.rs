//! Retry logic for upstream fetches with error classification.

use reqwest::StatusCode;

/// Maximum number of retry attempts for network operations.
pub const MAX_RETRIES: usize = 3;

/// Delay between retry attempts in milliseconds.
pub const RETRY_DELAY_MS: u64 = 1000;

/// Fetch failures that should not be retried.
///
/// Callers of the refresh operation can recover the concrete variant with
/// `error.downcast_ref::<FetchError>()` to drive their own backoff policy.
#[derive(Debug)]
pub enum FetchError {
    /// Package or repository does not exist upstream (HTTP 404)
    NotFound(String),
    /// Rate limit exceeded (HTTP 403 with rate limit message or 429)
    RateLimited(String),
    /// Authentication failed (HTTP 401)
    AuthenticationFailed(String),
    /// Forbidden access (HTTP 403 non-rate-limit)
    Forbidden(String),
    /// Other client errors that won't succeed on retry
    ClientError(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::NotFound(msg) => {
                write!(f, "Not found: {}", msg)
            }
            FetchError::RateLimited(msg) => {
                write!(f, "Rate limit exceeded: {}. Try again later.", msg)
            }
            FetchError::AuthenticationFailed(msg) => {
                write!(f, "Authentication failed: {}. Check your API token.", msg)
            }
            FetchError::Forbidden(msg) => {
                write!(f, "Access forbidden: {}. You may need authentication.", msg)
            }
            FetchError::ClientError(msg) => {
                write!(f, "Request error: {}", msg)
            }
        }
    }
}

impl std::error::Error for FetchError {}

/// Classifies an error as retryable or non-retryable.
/// Returns Ok(()) if the error is retryable, Err with a user-friendly message if not.
pub fn classify_error(error: &reqwest::Error) -> Result<(), FetchError> {
    if let Some(status) = error.status() {
        match status {
            StatusCode::UNAUTHORIZED => {
                return Err(FetchError::AuthenticationFailed(
                    "Invalid or missing authentication token".to_string(),
                ));
            }
            StatusCode::FORBIDDEN => {
                let msg = error.to_string();
                if msg.contains("rate limit") || msg.contains("API rate limit") {
                    return Err(FetchError::RateLimited(
                        "Upstream API rate limit exceeded".to_string(),
                    ));
                }
                return Err(FetchError::Forbidden(
                    "Access to this resource is forbidden".to_string(),
                ));
            }
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(FetchError::RateLimited("Too many requests".to_string()));
            }
            StatusCode::NOT_FOUND => {
                return Err(FetchError::NotFound(
                    "The requested resource was not found".to_string(),
                ));
            }
            // Other 4xx client errors are generally not retryable
            s if s.is_client_error() => {
                return Err(FetchError::ClientError(format!("HTTP {} error", s.as_u16())));
            }
            // 5xx server errors are retryable
            _ => {}
        }
    }

    // Connection errors, timeouts, etc. are retryable
    Ok(())
}

/// Checks if an error from `error_for_status()` should be retried.
/// Returns the original error if retryable, or a user-friendly FetchError if not.
pub fn check_retryable(error: reqwest::Error) -> anyhow::Error {
    match classify_error(&error) {
        Ok(()) => anyhow::Error::from(error),
        Err(non_retryable) => anyhow::Error::from(non_retryable),
    }
}
