//! Report rendering: human-readable text and structured JSON
//!
//! The renderer consumes the finished [`Summary`] and produces one of two
//! forms: a multi-line text block (optionally colorized) or JSON with
//! stable field names. Durations are serialized as human-readable strings
//! in both forms.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::models::{Summary, FAILURE_STATUS};
use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::Duration;

/// JSON mirror of [`Summary`] with humanized durations.
///
/// Field names are a stable contract for consumers of `--format json`;
/// the `"0"` key in `status_distribution` is the reserved transport
/// failure marker, not a real HTTP status.
#[derive(Debug, Serialize)]
struct JsonSummary {
    total_requests: u64,
    success_200: u64,
    status_distribution: BTreeMap<String, u64>,
    total_time: String,
    avg_latency: String,
    p95_latency: String,
    p99_latency: String,
}

impl From<&Summary> for JsonSummary {
    fn from(summary: &Summary) -> Self {
        let status_distribution = summary
            .status_distribution
            .iter()
            .map(|(status, count)| (status.to_string(), *count))
            .collect();

        Self {
            total_requests: summary.total_requests,
            success_200: summary.success_200,
            status_distribution,
            total_time: format_duration(summary.total_time),
            avg_latency: format_duration(summary.avg_latency),
            p95_latency: format_duration(summary.p95_latency),
            p99_latency: format_duration(summary.p99_latency),
        }
    }
}

/// Render a summary in the requested format.
///
/// # Errors
///
/// Returns a render error if JSON serialization fails.
pub fn render(summary: &Summary, format: OutputFormat, use_color: bool) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonSummary::from(summary))?;
            Ok(json)
        }
        OutputFormat::Text => Ok(render_text(summary, use_color)),
    }
}

fn render_text(summary: &Summary, use_color: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Total time:      {}", format_duration(summary.total_time));
    let _ = writeln!(out, "Total requests:  {}", summary.total_requests);
    let _ = writeln!(out, "HTTP 200:        {}", summary.success_200);

    let _ = writeln!(out, "Status distribution:");
    // Sorted so the failure sentinel (0) leads and repeated runs diff cleanly.
    let ordered: BTreeMap<u16, u64> = summary
        .status_distribution
        .iter()
        .map(|(k, v)| (*k, *v))
        .collect();
    for (status, count) in ordered {
        let label = status_label(status, use_color);
        let _ = writeln!(out, "  {}: {}", label, count);
    }

    let _ = writeln!(out, "Avg latency:     {}", format_duration(summary.avg_latency));
    let _ = writeln!(out, "P95 latency:     {}", format_duration(summary.p95_latency));
    let _ = writeln!(out, "P99 latency:     {}", format_duration(summary.p99_latency));

    out
}

/// Printable label for a status-distribution key.
///
/// The sentinel is rendered as `ERR` so readers never mistake it for a
/// real status code.
fn status_label(status: u16, use_color: bool) -> String {
    if status == FAILURE_STATUS {
        let label = "ERR".to_string();
        return if use_color {
            label.red().bold().to_string()
        } else {
            label
        };
    }

    let label = status.to_string();
    if !use_color {
        return label;
    }

    match status {
        200..=299 => label.green().to_string(),
        300..=399 => label.cyan().to_string(),
        400..=499 => label.yellow().to_string(),
        _ => label.red().to_string(),
    }
}

/// Format a duration as a compact human-readable string.
///
/// Picks the largest unit that keeps the value >= 1 (s, ms, µs, ns);
/// zero renders as `0s`.
pub fn format_duration(d: Duration) -> String {
    if d.is_zero() {
        return "0s".to_string();
    }

    let secs = d.as_secs_f64();
    if secs >= 1.0 {
        format!("{:.3}s", secs)
    } else if secs >= 1e-3 {
        format!("{:.3}ms", secs * 1e3)
    } else if secs >= 1e-6 {
        format!("{:.3}µs", secs * 1e6)
    } else {
        format!("{}ns", d.as_nanos())
    }
}
