//! Sermon library exports for the binary and integration tests

pub mod core;
pub mod error;
pub mod serial;
pub mod tui;

pub use error::SermonError;

/// Crate version, fixed at build time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
