//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router for the users endpoints
//! - Wire up middleware (request ID, tracing, body limit)
//! - Serve on a bound listener until shutdown is signalled

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::{Request, StatusCode},
    response::Response,
    routing::{get, put},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::request::{self, UuidRequestId};
use crate::http::response::plain_text_error;
use crate::http::users;
use crate::lifecycle::ShutdownSignal;
use crate::upstream::{UpstreamClient, UpstreamError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
}

/// HTTP server for the user proxy.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Result<Self, UpstreamError> {
        let upstream = UpstreamClient::new(&config.upstream)?;
        let router = build_router(&config, AppState { upstream });
        Ok(Self { router, config })
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Run the server until shutdown is triggered.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(config: &ServiceConfig, state: AppState) -> Router {
    Router::new()
        .route("/api/users", get(users::list_users).post(users::create_user))
        .route("/api/users/{id}", put(users::update_user))
        .fallback(not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.listener.max_body_size))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(|req: &Request<Body>| request::make_span(req)),
                )
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}

async fn not_found() -> Response {
    plain_text_error(StatusCode::NOT_FOUND, "404 page not found")
}
