//! Configuration validation.
//!
//! Serde handles syntax; this module checks values that deserialize fine but
//! cannot be used. All errors are collected rather than stopping at the first.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid socket address for {field}: '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("invalid upstream base_url '{0}': {1}")]
    InvalidBaseUrl(String, String),

    #[error("upstream base_url must not end with '/': '{0}'")]
    TrailingSlash(String),

    #[error("upstream users_path must start with '/': '{0}'")]
    RelativeUsersPath(String),

    #[error("listener max_body_size must be greater than zero")]
    ZeroBodyLimit,
}

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if config.listener.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    let base_url = &config.upstream.base_url;
    match Url::parse(base_url) {
        Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
            errors.push(ValidationError::InvalidBaseUrl(
                base_url.clone(),
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::InvalidBaseUrl(base_url.clone(), e.to_string())),
    }
    if base_url.ends_with('/') {
        errors.push(ValidationError::TrailingSlash(base_url.clone()));
    }

    if !config.upstream.users_path.starts_with('/') {
        errors.push(ValidationError::RelativeUsersPath(
            config.upstream.users_path.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}
