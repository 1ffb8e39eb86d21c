//! Command-line interface for the load generator

use clap::{ArgAction, Parser};

/// HTTP Load Generator - issue concurrent requests and report latency statistics
#[derive(Parser, Debug, Clone)]
#[command(name = "hload")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Target URL (http or https)
    #[arg(long)]
    pub url: String,

    /// Total number of requests to issue
    #[arg(short = 'n', long)]
    pub requests: u64,

    /// Number of concurrent workers (clamped to the request count)
    #[arg(short = 'c', long, default_value_t = num_cpus::get() as u64)]
    pub concurrency: u64,

    /// Per-request timeout in seconds
    #[arg(short = 't', long, default_value_t = crate::defaults::DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// HTTP method (GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS)
    #[arg(short = 'X', long, default_value = crate::defaults::DEFAULT_METHOD)]
    pub method: String,

    /// Request header in 'Key: Value' form (can be used multiple times)
    #[arg(short = 'H', long = "header", action = ArgAction::Append)]
    pub headers: Vec<String>,

    /// Request body, or '@path' to read the body from a file
    #[arg(long)]
    pub body: Option<String>,

    /// Report format: text or json
    #[arg(long, default_value = crate::defaults::DEFAULT_FORMAT)]
    pub format: String,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Validate flag-level conflicts before configuration loading.
    ///
    /// Value-level validation (URL scheme, method whitelist, header
    /// syntax) lives in the config layer.
    pub fn validate(&self) -> Result<(), String> {
        if self.url.trim().is_empty() {
            return Err("--url must not be empty".to_string());
        }

        Ok(())
    }
}
