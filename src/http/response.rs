//! Response relay and local error responses.
//!
//! # Responsibilities
//! - Relay upstream bodies byte-for-byte under a JSON content type
//! - Map local failures to plain-text error responses
//!
//! # Design Decisions
//! - Error bodies are a single text line, never JSON
//! - The local status is chosen by the handler, not copied from upstream

use std::error::Error as _;

use axum::{
    body::Bytes,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::upstream::UpstreamError;

/// Failures a handler reports to the local client.
///
/// The display string is the exact message sent in the response body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request payload")]
    InvalidPayload(#[source] serde_json::Error),

    #[error("Failed to create request to external API")]
    BuildRequest(#[source] UpstreamError),

    #[error("Failed to fetch data from external API")]
    Fetch(#[source] UpstreamError),

    #[error("Failed to send request to external API")]
    Send(#[source] UpstreamError),

    #[error("Failed to read response from external API")]
    Read(#[source] UpstreamError),

    #[error("Failed to parse JSON response")]
    Parse(#[source] serde_json::Error),
}

impl ApiError {
    /// Classify an upstream failure.
    ///
    /// Body read failures always report the read phase; anything else is
    /// wrapped with `transport`, which names the handler's send phase.
    pub fn from_upstream(err: UpstreamError, transport: fn(UpstreamError) -> ApiError) -> Self {
        match err {
            UpstreamError::Read(_) => ApiError::Read(err),
            other => transport(other),
        }
    }

    /// Local status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let cause = self.source().map(ToString::to_string).unwrap_or_default();

        if status.is_server_error() {
            tracing::error!(status = %status, cause = %cause, "{}", self);
        } else {
            tracing::warn!(status = %status, cause = %cause, "{}", self);
        }

        plain_text_error(status, &self.to_string())
    }
}

/// A single-line `text/plain` error response.
pub fn plain_text_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ],
        format!("{message}\n"),
    )
        .into_response()
}

/// Relay an upstream body unchanged with the given local status.
pub fn relay_json(status: StatusCode, body: Bytes) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}
