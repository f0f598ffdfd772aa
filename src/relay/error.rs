//! Relay failures and their HTTP representation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::http::response::error_response;

/// Why a relayed request did not produce the upstream body.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Upstream answered with a non-2xx status.
    #[error("Upstream returned {}", describe(.status))]
    Upstream { status: StatusCode },

    /// Upstream could not be reached at all.
    #[error("Failed to fetch upstream for {path}: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// Upstream accepted the request but sent no response headers in time.
    #[error("Timed out after {secs}s waiting for upstream for {path}")]
    Timeout { path: String, secs: u64 },
}

impl RelayError {
    /// Status sent back to the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Upstream { status } => *status,
            RelayError::Transport { .. } | RelayError::Timeout { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        error_response(self.status(), self.to_string())
    }
}

/// Errors raised while building the upstream client at startup.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("upstream token contains characters not allowed in a header")]
    InvalidToken,

    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

fn describe(status: &StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}
