//! Immutable request template shared by all workers

use reqwest::header::HeaderMap;
use reqwest::Method;

/// Template for every request issued during a run.
///
/// Built once by the configuration layer and shared read-only across the
/// worker pool behind an `Arc`. Headers keep multimap semantics: repeated
/// keys are appended, not replaced.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// HTTP method for every request
    pub method: Method,

    /// Target URL
    pub url: reqwest::Url,

    /// Request headers (repeated keys allowed)
    pub headers: HeaderMap,

    /// Request body bytes (empty for body-less requests)
    pub body: Vec<u8>,
}

impl RequestSpec {
    /// Create a spec for a body-less GET request
    pub fn get(url: reqwest::Url) -> Self {
        Self {
            method: Method::GET,
            url,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }
}
