//! Error types for abacus-api
//!
//! `Display` on [`ApiError`] is the user-facing message the calculator
//! shows verbatim, so the texts here match the front-end copy exactly.

use serde_json::Value;
use thiserror::Error;

/// Classified evaluation service errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response. `message` is the service-supplied detail, or a
    /// `Request failed with status <code>` fallback.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Transport failure before a response arrived.
    #[error("Network error. Please check your connection and try again.")]
    Network(#[source] reqwest::Error),

    /// The configured request timeout elapsed.
    #[error("Request timeout. Please try again.")]
    Timeout(#[source] reqwest::Error),

    /// Anything unclassified (client build failures, undecodable bodies).
    /// The inner string is the diagnostic detail; `Display` stays on the
    /// generic front-end copy.
    #[error("An unexpected error occurred")]
    Unexpected(String),
}

impl ApiError {
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// HTTP status code, when the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Sort a reqwest transport error into the taxonomy.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else if err.is_connect() || err.is_request() {
            Self::Network(err)
        } else {
            Self::Unexpected(err.to_string())
        }
    }
}

/// Pull the human-readable message out of a FastAPI-style error body.
///
/// Validation errors arrive as `detail[0].msg`, handler errors as a
/// `detail` string; anything else falls back to the status line.
pub(crate) fn status_message(status: u16, body: &Value) -> String {
    if let Some(msg) = body
        .get("detail")
        .and_then(|detail| detail.get(0))
        .and_then(|first| first.get("msg"))
        .and_then(Value::as_str)
    {
        return msg.to_string();
    }
    if let Some(detail) = body.get("detail").and_then(Value::as_str) {
        return detail.to_string();
    }
    format!("Request failed with status {status}")
}

pub type Result<T> = std::result::Result<T, ApiError>;
