//! Per-request outcomes and the aggregate run summary

use std::collections::HashMap;
use std::time::Duration;

/// Reserved status value for requests that produced no usable HTTP
/// response (timeout, connection refused, DNS failure, TLS failure).
///
/// This is a sentinel, never a real HTTP status code. Consumers of the
/// status distribution must treat key 0 as "transport failure".
pub const FAILURE_STATUS: u16 = 0;

/// Recorded result of one executed request.
///
/// Produced by exactly one worker per job token and never mutated after
/// creation; ownership moves from the worker to the aggregator through
/// the result channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// HTTP status code, or [`FAILURE_STATUS`] when no response was obtained
    pub status: u16,

    /// Wall-clock time from request submission to completion (success or failure)
    pub latency: Duration,
}

impl Outcome {
    /// Create an outcome for a request that returned an HTTP response
    pub fn response(status: u16, latency: Duration) -> Self {
        Self { status, latency }
    }

    /// Create an outcome for a request that failed without a response
    pub fn failure(latency: Duration) -> Self {
        Self {
            status: FAILURE_STATUS,
            latency,
        }
    }

    /// Check if this outcome carries a real HTTP status
    pub fn is_failure(&self) -> bool {
        self.status == FAILURE_STATUS
    }

    /// Latency in milliseconds
    pub fn latency_ms(&self) -> f64 {
        self.latency.as_secs_f64() * 1000.0
    }
}

/// Aggregate statistics for one complete (or cancelled) run.
///
/// Computed once by the aggregator from the full outcome multiset and
/// immutable thereafter. `total_time` covers the whole run and is stamped
/// by the caller, not the aggregator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Summary {
    /// Number of outcomes counted
    pub total_requests: u64,

    /// Number of outcomes with status exactly 200
    pub success_200: u64,

    /// Occurrence count per status code (key 0 = transport failure)
    pub status_distribution: HashMap<u16, u64>,

    /// Wall-clock duration of the whole run
    pub total_time: Duration,

    /// Arithmetic mean latency (zero for an empty run)
    pub avg_latency: Duration,

    /// 95th percentile latency, nearest-rank (zero for an empty run)
    pub p95_latency: Duration,

    /// 99th percentile latency, nearest-rank (zero for an empty run)
    pub p99_latency: Duration,
}

impl Summary {
    /// Success rate as a percentage of counted outcomes
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            (self.success_200 as f64 / self.total_requests as f64) * 100.0
        }
    }

    /// Number of outcomes recorded under the failure sentinel
    pub fn failure_count(&self) -> u64 {
        self.status_distribution
            .get(&FAILURE_STATUS)
            .copied()
            .unwrap_or(0)
    }
}
