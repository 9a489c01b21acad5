//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handlers + upstream client produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (upstream call counters and latency histograms)
//!
//! Consumers:
//!     → stdout (fmt layer, filtered by RUST_LOG or config)
//!     → Prometheus scrape endpoint (opt-in)
//! ```
//!
//! Request IDs are attached by the HTTP layer (see `http::request`) and show
//! up on every span opened for a local request.

pub mod logging;
pub mod metrics;
