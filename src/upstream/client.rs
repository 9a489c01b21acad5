//! HTTP client for the upstream users API.
//!
//! # Responsibilities
//! - Own the single pooled `reqwest::Client` for the process
//! - Build upstream URLs by plain concatenation onto the base URL
//! - Issue exactly one request per call and buffer the response body
//! - Report which phase failed (build, send, read)

use std::time::{Duration, Instant};

use axum::body::Bytes;
use reqwest::{Method, Request, StatusCode};

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::upstream::error::{UpstreamError, UpstreamResult};
use crate::users::User;

/// A buffered upstream response.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    /// Status reported by the upstream, passed through unchanged.
    pub status: StatusCode,
    /// Raw response bytes.
    pub body: Bytes,
}

/// Client for the fixed upstream API.
#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
    users_path: String,
}

impl UpstreamClient {
    /// Create the shared client with the configured pool settings.
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let mut builder = reqwest::Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Duration::from_secs(config.pool_idle_timeout_secs))
            .tcp_keepalive(Duration::from_secs(config.tcp_keepalive_secs))
            .user_agent(config.user_agent.clone());
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(UpstreamError::Client)?;

        tracing::info!(
            base_url = %config.base_url,
            users_path = %config.users_path,
            pool_max_idle_per_host = config.pool_max_idle_per_host,
            "Upstream client initialized"
        );

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            users_path: config.users_path.clone(),
        })
    }

    /// Path suffix of the users collection.
    pub fn users_path(&self) -> &str {
        &self.users_path
    }

    /// Path suffix of a single user. The id is inserted verbatim.
    pub fn user_path(&self, id: &str) -> String {
        format!("{}/{}", self.users_path, id)
    }

    /// Full upstream URL for a path suffix, without any re-encoding.
    pub fn url_for(&self, path_suffix: &str) -> String {
        format!("{}{}", self.base_url, path_suffix)
    }

    /// Build a request object. A body is encoded as JSON and sent with a
    /// JSON content type; encoding failures surface as [`UpstreamError::Build`].
    pub fn prepare(
        &self,
        method: Method,
        path_suffix: &str,
        body: Option<&User>,
    ) -> UpstreamResult<Request> {
        let mut builder = self.client.request(method, self.url_for(path_suffix));
        if let Some(user) = body {
            builder = builder.json(user);
        }
        builder.build().map_err(UpstreamError::Build)
    }

    /// Send a prepared request and buffer its body.
    ///
    /// The call runs on its own task, so it completes even if the caller is
    /// dropped mid-flight.
    pub async fn execute(&self, request: Request) -> UpstreamResult<UpstreamResponse> {
        let method = request.method().clone();
        let url = request.url().to_string();
        let client = self.client.clone();
        let start = Instant::now();

        let result = tokio::spawn(async move {
            let response = client.execute(request).await.map_err(UpstreamError::Send)?;
            let status = response.status();
            let body = response.bytes().await.map_err(UpstreamError::Read)?;
            Ok::<_, UpstreamError>(UpstreamResponse { status, body })
        })
        .await
        .unwrap_or_else(|e| Err(UpstreamError::Aborted(e)));

        metrics::record_upstream_call(
            method.as_str(),
            result.as_ref().ok().map(|r| r.status.as_u16()),
            start,
        );

        match &result {
            Ok(response) => tracing::debug!(
                method = %method,
                url = %url,
                status = %response.status,
                bytes = response.body.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Upstream call completed"
            ),
            Err(e) => tracing::debug!(method = %method, url = %url, error = %e, "Upstream call failed"),
        }

        result
    }

    /// Prepare and execute in one step.
    pub async fn call(
        &self,
        method: Method,
        path_suffix: &str,
        body: Option<&User>,
    ) -> UpstreamResult<UpstreamResponse> {
        let request = self.prepare(method, path_suffix, body)?;
        self.execute(request).await
    }
}
