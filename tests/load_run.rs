//! End-to-end load-run scenarios against a mock HTTP server
//!
//! These exercise the full engine (config -> worker pool -> aggregation)
//! with the real reqwest-backed executor, using wiremock so no external
//! network is involved.

use http_load_generator::{
    config::{Config, OutputFormat},
    models::RequestSpec,
    runner, ReqwestExecutor,
};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use wiremock::matchers::{body_bytes, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn run_config(url: reqwest::Url, requests: u64, concurrency: usize) -> Config {
    Config {
        spec: RequestSpec::get(url),
        requests,
        concurrency,
        timeout: Duration::from_secs(5),
        format: OutputFormat::Text,
        enable_color: false,
        verbose: false,
        debug: false,
    }
}

fn no_cancel() -> watch::Receiver<bool> {
    let (_tx, rx) = watch::channel(false);
    rx
}

async fn execute(config: &Config) -> http_load_generator::Summary {
    let executor = Arc::new(ReqwestExecutor::new(config.timeout).unwrap());
    runner::run(config, executor, no_cancel()).await
}

#[tokio::test]
async fn fifty_requests_against_ok_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .expect(50)
        .mount(&server)
        .await;

    let url = reqwest::Url::parse(&format!("{}/ok", server.uri())).unwrap();
    let summary = execute(&run_config(url, 50, 5)).await;

    assert_eq!(summary.total_requests, 50);
    assert_eq!(summary.success_200, 50);
    assert_eq!(summary.status_distribution[&200], 50);
}

#[tokio::test]
async fn fifty_requests_against_notfound_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notfound"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = reqwest::Url::parse(&format!("{}/notfound", server.uri())).unwrap();
    let summary = execute(&run_config(url, 50, 5)).await;

    assert_eq!(summary.total_requests, 50);
    assert_eq!(summary.success_200, 0);
    assert_eq!(summary.status_distribution[&404], 50);
}

#[tokio::test]
async fn slow_endpoint_is_reflected_in_latency() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(20)))
        .mount(&server)
        .await;

    let url = reqwest::Url::parse(&format!("{}/slow", server.uri())).unwrap();
    let summary = execute(&run_config(url, 10, 2)).await;

    assert_eq!(summary.total_requests, 10);
    assert!(
        summary.avg_latency >= Duration::from_millis(20),
        "avg {:?} should cover the 20ms server delay",
        summary.avg_latency
    );
    assert!(summary.p99_latency >= summary.p95_latency);
}

#[tokio::test]
async fn post_body_and_headers_are_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/submit"))
        .and(header("x-api-key", "secret"))
        .and(body_bytes(b"{\"k\":1}".to_vec()))
        .respond_with(ResponseTemplate::new(201))
        .expect(8)
        .mount(&server)
        .await;

    let url = reqwest::Url::parse(&format!("{}/submit", server.uri())).unwrap();
    let mut headers = HeaderMap::new();
    headers.insert("x-api-key", HeaderValue::from_static("secret"));

    let config = Config {
        spec: RequestSpec {
            method: Method::POST,
            url,
            headers,
            body: b"{\"k\":1}".to_vec(),
        },
        requests: 8,
        concurrency: 4,
        timeout: Duration::from_secs(5),
        format: OutputFormat::Text,
        enable_color: false,
        verbose: false,
        debug: false,
    };

    let summary = execute(&config).await;
    assert_eq!(summary.total_requests, 8);
    assert_eq!(summary.status_distribution[&201], 8);
}

#[tokio::test]
async fn unreachable_target_yields_sentinel_outcomes() {
    // Nothing listens on this port; every request fails at the transport
    // layer and must be recorded under the status-0 sentinel.
    let url = reqwest::Url::parse("http://127.0.0.1:1/down").unwrap();
    let mut config = run_config(url, 10, 2);
    config.timeout = Duration::from_secs(1);

    let summary = execute(&config).await;

    assert_eq!(summary.total_requests, 10);
    assert_eq!(summary.success_200, 0);
    assert_eq!(summary.status_distribution[&0], 10);
    assert_eq!(summary.failure_count(), 10);
}

#[tokio::test]
async fn mixed_statuses_sum_to_total() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let url = reqwest::Url::parse(&format!("{}/flaky", server.uri())).unwrap();
    let summary = execute(&run_config(url, 30, 3)).await;

    let dist_total: u64 = summary.status_distribution.values().sum();
    assert_eq!(dist_total, summary.total_requests);
    assert_eq!(summary.total_requests, 30);
}

#[tokio::test]
async fn cancellation_mid_run_returns_partial_summary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(10)))
        .mount(&server)
        .await;

    let url = reqwest::Url::parse(&format!("{}/slow", server.uri())).unwrap();
    let config = run_config(url, 500, 2);
    let executor = Arc::new(ReqwestExecutor::new(config.timeout).unwrap());

    let (cancel_tx, cancel_rx) = watch::channel(false);
    let run_fut = runner::run(&config, executor, cancel_rx);
    let cancel_fut = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        let _ = cancel_tx.send(true);
    };

    let (summary, ()) = tokio::time::timeout(
        Duration::from_secs(10),
        futures::future::join(run_fut, cancel_fut),
    )
    .await
    .expect("cancelled run must terminate");

    assert!(summary.total_requests < 500);
    let dist_total: u64 = summary.status_distribution.values().sum();
    assert_eq!(dist_total, summary.total_requests);
}
