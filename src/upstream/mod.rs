//! Upstream users API subsystem.
//!
//! # Data Flow
//! ```text
//! handler (method, path suffix, optional JSON body)
//!     → client.rs prepare() (URL concatenation, JSON content type)
//!     → client.rs execute() (one detached HTTP call, body buffered)
//!     → UpstreamResponse { status, body } | UpstreamError
//! ```
//!
//! # Design Decisions
//! - One pooled client per process, shared by every handler
//! - Upstream HTTP error statuses are successful outcomes, not errors
//! - No retries and no request timeout
//! - The upstream call outlives a disconnected local client

pub mod client;
pub mod error;

pub use client::{UpstreamClient, UpstreamResponse};
pub use error::UpstreamError;
