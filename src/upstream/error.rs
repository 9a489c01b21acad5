//! Upstream error definitions.

use thiserror::Error;

/// Errors raised while talking to the upstream API.
///
/// Each variant names the phase that failed so handlers can report it.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The shared HTTP client could not be constructed.
    #[error("failed to initialize upstream client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request object could not be built (e.g. malformed URL).
    #[error("failed to build upstream request: {0}")]
    Build(#[source] reqwest::Error),

    /// Connection, DNS or transport failure while sending.
    #[error("upstream request failed: {0}")]
    Send(#[source] reqwest::Error),

    /// The response arrived but its body could not be read.
    #[error("failed to read upstream response: {0}")]
    Read(#[source] reqwest::Error),

    /// The detached task running the call panicked or was cancelled.
    #[error("upstream call aborted: {0}")]
    Aborted(#[from] tokio::task::JoinError),
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;
