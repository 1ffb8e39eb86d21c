//! HTTP Load Generator
//!
//! A command-line HTTP load generator: issues a configured number of
//! requests against a target URL with a fixed-size concurrent worker
//! pool, and reports counts, status distribution and latency percentiles.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod runner;
pub mod stats;

// Re-export commonly used types
pub use client::{ReqwestExecutor, RequestExecutor};
pub use config::{Config, OutputFormat};
pub use error::{AppError, Result};
pub use models::{Outcome, RequestSpec, Summary};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const DEFAULT_METHOD: &str = "GET";
    pub const DEFAULT_FORMAT: &str = "text";
}
