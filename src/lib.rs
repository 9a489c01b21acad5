//! Local HTTP proxy for a remote users REST API.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;
pub mod users;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use users::User;
