//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, span)
//!     → users.rs (decode body, one upstream call)
//!     → response.rs (relay body or plain-text error)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;
pub mod users;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{build_router, AppState, HttpServer};
