//! The user resource relayed to and from the upstream API.

pub mod types;

pub use types::User;
