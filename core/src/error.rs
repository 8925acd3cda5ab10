//! Error types for the `fetch` action.
//!
//! # Design
//! The two enums live on opposite sides of the executor. `ValidationError`
//! is returned before a request exists and is the caller's problem to
//! report. `FetchError` is produced by client backends and the executor's
//! own boundary, and never escapes: its `Display` text becomes the `error`
//! field of a failed `ResponseResult`.

use std::error::Error as StdError;
use std::time::Duration;

/// Failure to obtain any response from the remote.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The per-call timeout elapsed before the full response was read.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The connection could not be established (refused, DNS, TLS).
    #[error("connection failed: {0}")]
    Connect(String),

    /// Any other failure reported by the HTTP client layer.
    #[error("{0}")]
    Transport(String),

    /// A failure the client layer did not report as an error, e.g. a panic.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl FetchError {
    pub fn is_unexpected(&self) -> bool {
        matches!(self, FetchError::Unexpected(_))
    }
}

/// Rejection of `fetch` input before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Wrong shape, wrong type, unknown field, or a method outside the set.
    #[error("invalid fetch parameters: {0}")]
    Malformed(String),

    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("url {0:?} must use the http or https scheme")]
    UnsupportedScheme(String),

    #[error("timeout must be a positive number of seconds")]
    NonPositiveTimeout,

    #[error("invalid header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },
}

/// Render an error and its source chain as one line.
///
/// Client errors often keep the useful part (`Connection refused`) in a
/// nested source, so the top-level message alone is not enough.
pub(crate) fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
