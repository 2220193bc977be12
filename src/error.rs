//! Error types for pagefeed
//!
//! The failure taxonomy is a closed set: every fallible operation in the
//! crate resolves to one of the variants below, so callers can match
//! exhaustively instead of downcasting. Cancellation is not an error:
//! a cancelled fetch is a dropped future and produces no result at all.

use thiserror::Error;

/// The main error type for pagefeed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The connectivity gate reported no usable network path. No request
    /// was attempted.
    #[error("network unavailable")]
    NoInternet,

    /// The feed is exhausted: either the engine already knows there is
    /// nothing left, or the server returned an empty page.
    #[error("no more pages")]
    NoMorePages,

    /// Any transport, decoding, or otherwise unexpected failure, with a
    /// best-effort diagnostic.
    #[error("{message}")]
    Unknown { message: String },
}

impl Error {
    /// Create an unknown error from a message
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
        }
    }

    /// Check if this error marks the end of the feed
    pub fn is_end_of_feed(&self) -> bool {
        matches!(self, Self::NoMorePages)
    }

    /// Check if this error is a pre-flight connectivity failure
    pub fn is_offline(&self) -> bool {
        matches!(self, Self::NoInternet)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        let message = if e.is_timeout() {
            format!("request timed out: {e}")
        } else if e.is_connect() {
            format!("connection failed: {e}")
        } else if let Some(status) = e.status() {
            format!("HTTP {}: {e}", status.as_u16())
        } else if e.is_decode() {
            format!("failed to decode response: {e}")
        } else {
            e.to_string()
        };
        Self::Unknown { message }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Unknown {
            message: format!("failed to parse response body: {e}"),
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Self::Unknown {
            message: format!("invalid URL: {e}"),
        }
    }
}

/// Result type alias for pagefeed
pub type Result<T> = std::result::Result<T, Error>;
