//! Aggregation of request outcomes into a run summary
//!
//! This is a pure reduction stage: it consumes the complete multiset of
//! outcomes gathered by the worker pool (possibly partial after a
//! cancellation) and produces counts, a status distribution, the mean
//! latency and nearest-rank percentiles. It performs no I/O and has no
//! failure mode; an empty input yields an all-zero summary.

use crate::models::{Outcome, Summary};
use std::collections::HashMap;
use std::time::Duration;

/// Reduce a set of outcomes into a [`Summary`].
///
/// Order-independent: the only ordering applied is the internal sort of
/// latencies for percentile lookup. `total_time` is left at zero and is
/// stamped by the caller that measured the run.
pub fn collect(outcomes: &[Outcome]) -> Summary {
    let mut status_distribution: HashMap<u16, u64> = HashMap::new();
    let mut success_200: u64 = 0;
    let mut latencies: Vec<Duration> = Vec::with_capacity(outcomes.len());

    for outcome in outcomes {
        if outcome.status == 200 {
            success_200 += 1;
        }
        *status_distribution.entry(outcome.status).or_insert(0) += 1;
        latencies.push(outcome.latency);
    }

    let mut summary = Summary {
        total_requests: outcomes.len() as u64,
        success_200,
        status_distribution,
        ..Default::default()
    };

    if !latencies.is_empty() {
        let sum: Duration = latencies.iter().sum();
        summary.avg_latency = sum / latencies.len() as u32;

        latencies.sort_unstable();
        summary.p95_latency = percentile(&latencies, 95);
        summary.p99_latency = percentile(&latencies, 99);
    }

    summary
}

/// Nearest-rank percentile of a sorted sample.
///
/// For percentile `p` over `n` values the result is the value at index
/// `ceil(n * p / 100) - 1`, clamped to `[0, n - 1]`. No interpolation is
/// performed, so small samples return an actually observed latency;
/// alternate percentile definitions will disagree on small samples by
/// design. Returns zero for an empty sample.
///
/// `sorted` must be in ascending order.
pub fn percentile(sorted: &[Duration], p: u64) -> Duration {
    let n = sorted.len() as u64;
    if n == 0 {
        return Duration::ZERO;
    }

    // Integer ceiling of n*p/100, shifted to a zero-based index.
    let rank = (n * p).div_ceil(100);
    let idx = rank.saturating_sub(1).min(n - 1) as usize;
    sorted[idx]
}
