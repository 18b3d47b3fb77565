//! Backend request error types
//!
//! # Error Types
//!
//! - **`Cancelled`**: the request was superseded or its owner went away;
//!   never shown to the user
//! - **`Network`**: connection, timeout or transport failure
//! - **`HttpStatus`**: the backend answered with a non-2xx status
//! - **`Decode`**: the response body was not the expected JSON
//! - **`InvalidUrl`**: the configured API address cannot be used
//!
//! Everything except `Cancelled` surfaces to the user as one generic
//! message; the detailed variant goes to the log.

use thiserror::Error;

/// Message shown for any failed fetch
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data. Please try again later.";

/// Errors talking to the recipe backend
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Request was cancelled before it completed
    #[error("Request cancelled")]
    Cancelled,

    /// Transport-level failure
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status
    #[error("HTTP error! status: {status}")]
    HttpStatus { status: u16 },

    /// Response body could not be decoded
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The API address is unusable
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// True for cancellations, which callers discard silently
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Generic text suitable for a user-facing notification
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Cancelled => "Request cancelled",
            Self::InvalidUrl(_) => "The recipe service address is invalid. Check api_url in the configuration.",
            Self::Network(_) | Self::HttpStatus { .. } | Self::Decode(_) => FETCH_FAILED_MESSAGE,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::HttpStatus {
                status: status.as_u16(),
            }
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
