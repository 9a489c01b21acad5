//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every section carries `#[serde(default)]` so a partial file is valid.

use serde::{Deserialize, Serialize};

/// Root configuration for the user proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Local listener settings.
    pub listener: ListenerConfig,

    /// The upstream users API.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,

    /// Maximum accepted request body in bytes.
    pub max_body_size: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Upstream API configuration.
///
/// The pool settings are applied to the one client shared by every handler.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Scheme and host of the upstream API, without a trailing slash.
    pub base_url: String,

    /// Path of the users collection, appended to `base_url`.
    pub users_path: String,

    /// Idle keep-alive connections kept per upstream host.
    pub pool_max_idle_per_host: usize,

    /// Seconds an idle pooled connection is kept before closing.
    pub pool_idle_timeout_secs: u64,

    /// TCP keep-alive interval in seconds.
    pub tcp_keepalive_secs: u64,

    /// User-Agent sent on upstream requests.
    pub user_agent: String,

    /// Honour HTTP(S)_PROXY environment variables for upstream calls.
    pub use_system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://jsonplaceholder.typicode.com".to_string(),
            users_path: "/users".to_string(),
            pool_max_idle_per_host: 32,
            pool_idle_timeout_secs: 90,
            tcp_keepalive_secs: 60,
            user_agent: concat!("user-proxy/", env!("CARGO_PKG_VERSION")).to_string(),
            use_system_proxy: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
