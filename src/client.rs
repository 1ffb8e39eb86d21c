//! HTTP request execution over a shared connection-pooled client
//!
//! The worker pool treats request execution as an injected capability:
//! [`RequestExecutor`] is the single seam between the dispatch engine and
//! the network, so tests can substitute a deterministic fake executor for
//! the real client.

use crate::error::{AppError, Result};
use crate::models::RequestSpec;
use async_trait::async_trait;
use std::time::Duration;

/// Connection timeout for establishing new connections
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// TCP keep-alive interval for pooled connections
const TCP_KEEP_ALIVE: Duration = Duration::from_secs(30);

/// How long idle connections stay in the pool
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Maximum idle connections kept per host
const MAX_IDLE_PER_HOST: usize = 1000;

/// Executes one HTTP request described by a [`RequestSpec`].
///
/// Implementations must be safe for concurrent invocation from every
/// worker in the pool. An `Err` return means no usable status code was
/// obtained (timeout, connection failure, DNS failure, malformed
/// response); the caller records it as a sentinel outcome, never as a
/// run-level error.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Execute one request and return the HTTP status code
    async fn execute(&self, spec: &RequestSpec) -> std::result::Result<u16, ExecuteError>;
}

/// Failure to obtain an HTTP response for a single request.
///
/// Deliberately opaque: per-request failures are recorded as data (the
/// status-0 sentinel), so nothing downstream branches on the cause. The
/// message is kept for debug logging only.
#[derive(Debug)]
pub struct ExecuteError(pub String);

impl std::fmt::Display for ExecuteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "request failed: {}", self.0)
    }
}

impl std::error::Error for ExecuteError {}

/// [`RequestExecutor`] backed by a pooled `reqwest` client.
///
/// One instance is shared by the whole worker pool; its internal
/// connection pool is the only shared mutable state in a run and is safe
/// for concurrent use by design.
pub struct ReqwestExecutor {
    client: reqwest::Client,
}

impl ReqwestExecutor {
    /// Build an executor with the given per-request timeout.
    ///
    /// Pool tuning is sized for load generation: large idle pool per host
    /// so `concurrency` connections are reused across the whole run.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::HttpClient`] if the underlying client cannot
    /// be constructed.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .tcp_keepalive(TCP_KEEP_ALIVE)
            .pool_idle_timeout(POOL_IDLE_TIMEOUT)
            .pool_max_idle_per_host(MAX_IDLE_PER_HOST)
            .build()
            .map_err(|e| AppError::http_client(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl RequestExecutor for ReqwestExecutor {
    async fn execute(&self, spec: &RequestSpec) -> std::result::Result<u16, ExecuteError> {
        let response = self
            .client
            .request(spec.method.clone(), spec.url.clone())
            .headers(spec.headers.clone())
            .body(spec.body.clone())
            .send()
            .await
            .map_err(|e| ExecuteError(e.to_string()))?;

        let status = response.status().as_u16();

        // Drain the body so the connection can return to the pool; transfer
        // time counts toward the measured latency.
        response
            .bytes()
            .await
            .map_err(|e| ExecuteError(format!("reading body: {}", e)))?;

        Ok(status)
    }
}
