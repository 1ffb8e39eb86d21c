//! Validated run configuration built from the CLI surface
//!
//! Everything the core engine consumes is validated here, once, before
//! any request is sent: URL scheme, method whitelist, header syntax,
//! body loading and the concurrency clamp. The engine itself performs no
//! re-validation.

use crate::cli::Cli;
use crate::error::{AppError, Result};
use crate::models::RequestSpec;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use std::fs;
use std::time::Duration;

/// Output format for the final report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable multi-line text block
    Text,
    /// Structured JSON with stable field names
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(AppError::validation(format!(
                "invalid --format '{}': expected 'text' or 'json'",
                other
            ))),
        }
    }
}

/// Immutable configuration for one load-generation run.
///
/// Built once from the CLI and owned read-only by the engine for the
/// duration of the run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Request template shared by all workers
    pub spec: RequestSpec,

    /// Total number of requests to issue (> 0)
    pub requests: u64,

    /// Number of concurrent workers (> 0, never exceeds `requests`)
    pub concurrency: usize,

    /// Per-request timeout
    pub timeout: Duration,

    /// Report output format
    pub format: OutputFormat,

    /// Colorize the text report
    pub enable_color: bool,

    /// Verbose progress output
    pub verbose: bool,

    /// Debug output
    pub debug: bool,
}

/// Build and validate a [`Config`] from parsed CLI arguments.
///
/// Concurrency greater than the request count is silently clamped to the
/// request count: extra workers would never receive a job token, so the
/// clamp is policy, not an error.
///
/// # Errors
///
/// Returns a validation, parse or I/O error for any rejected input; the
/// engine is never invoked with an invalid configuration.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let url = parse_url(&cli.url)?;
    let method = parse_method(&cli.method)?;
    let headers = parse_headers(&cli.headers)?;
    let body = load_body(cli.body.as_deref())?;

    if cli.requests == 0 {
        return Err(AppError::validation("--requests must be > 0"));
    }
    if cli.concurrency == 0 {
        return Err(AppError::validation("--concurrency must be > 0"));
    }
    if cli.timeout == 0 {
        return Err(AppError::validation("--timeout must be > 0 seconds"));
    }

    // Silent clamp: more workers than requests is allowed but pointless.
    let concurrency = cli.concurrency.min(cli.requests) as usize;

    let format: OutputFormat = cli.format.parse()?;

    Ok(Config {
        spec: RequestSpec {
            method,
            url,
            headers,
            body,
        },
        requests: cli.requests,
        concurrency,
        timeout: Duration::from_secs(cli.timeout),
        format,
        enable_color: !cli.no_color,
        verbose: cli.verbose,
        debug: cli.debug,
    })
}

fn parse_url(raw: &str) -> Result<reqwest::Url> {
    let url = reqwest::Url::parse(raw)
        .map_err(|e| AppError::parse(format!("invalid URL '{}': {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(AppError::validation(format!(
            "unsupported URL scheme '{}': only http and https are allowed",
            scheme
        ))),
    }
}

fn parse_method(raw: &str) -> Result<Method> {
    // Accept lower-case spellings; the wire method is always upper case.
    match raw.to_uppercase().as_str() {
        "GET" => Ok(Method::GET),
        "POST" => Ok(Method::POST),
        "PUT" => Ok(Method::PUT),
        "PATCH" => Ok(Method::PATCH),
        "DELETE" => Ok(Method::DELETE),
        "HEAD" => Ok(Method::HEAD),
        "OPTIONS" => Ok(Method::OPTIONS),
        other => Err(AppError::validation(format!(
            "unsupported method: {}",
            other
        ))),
    }
}

/// Parse repeated `-H "Key: Value"` flags into a header map.
///
/// Repeated keys are appended, preserving multimap semantics. Whitespace
/// around both key and value is trimmed.
fn parse_headers(raw: &[String]) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    for entry in raw {
        let (key, value) = entry.split_once(':').ok_or_else(|| {
            AppError::parse(format!("invalid header '{}': expected 'Key: Value'", entry))
        })?;

        let name = HeaderName::from_bytes(key.trim().as_bytes())
            .map_err(|e| AppError::parse(format!("invalid header name '{}': {}", key, e)))?;
        let value = HeaderValue::from_str(value.trim())
            .map_err(|e| AppError::parse(format!("invalid header value in '{}': {}", entry, e)))?;

        headers.append(name, value);
    }

    Ok(headers)
}

/// Load the request body from a literal string or, with an `@` prefix,
/// from a file.
fn load_body(raw: Option<&str>) -> Result<Vec<u8>> {
    match raw {
        None => Ok(Vec::new()),
        Some(body) => match body.strip_prefix('@') {
            Some(path) => fs::read(path)
                .map_err(|e| AppError::io(format!("failed to read body file '{}': {}", path, e))),
            None => Ok(body.as_bytes().to_vec()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn base_cli() -> Cli {
        Cli {
            url: "http://localhost:8080/ok".to_string(),
            requests: 100,
            concurrency: 10,
            timeout: 10,
            method: "GET".to_string(),
            headers: Vec::new(),
            body: None,
            format: "text".to_string(),
            no_color: false,
            verbose: false,
            debug: false,
        }
    }

    #[test]
    fn test_valid_config() {
        let config = load_config(&base_cli()).unwrap();
        assert_eq!(config.requests, 100);
        assert_eq!(config.concurrency, 10);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.spec.method, Method::GET);
    }

    #[test]
    fn test_concurrency_clamped_to_requests() {
        let mut cli = base_cli();
        cli.requests = 5;
        cli.concurrency = 50;
        let config = load_config(&cli).unwrap();
        assert_eq!(config.concurrency, 5);
    }

    #[test]
    fn test_zero_requests_rejected() {
        let mut cli = base_cli();
        cli.requests = 0;
        assert!(matches!(
            load_config(&cli),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut cli = base_cli();
        cli.concurrency = 0;
        assert!(matches!(
            load_config(&cli),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let mut cli = base_cli();
        cli.url = "not a url".to_string();
        assert!(load_config(&cli).is_err());
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let mut cli = base_cli();
        cli.url = "ftp://example.com/file".to_string();
        assert!(matches!(
            load_config(&cli),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_method_case_insensitive() {
        let mut cli = base_cli();
        cli.method = "post".to_string();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.spec.method, Method::POST);
    }

    #[test]
    fn test_unsupported_method_rejected() {
        let mut cli = base_cli();
        cli.method = "TRACE".to_string();
        assert!(matches!(
            load_config(&cli),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_header_parsing_trims_whitespace() {
        let mut cli = base_cli();
        cli.headers = vec!["Content-Type: application/json".to_string()];
        let config = load_config(&cli).unwrap();
        assert_eq!(
            config.spec.headers.get("content-type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_repeated_headers_appended() {
        let mut cli = base_cli();
        cli.headers = vec!["X-Tag: a".to_string(), "X-Tag: b".to_string()];
        let config = load_config(&cli).unwrap();
        assert_eq!(config.spec.headers.get_all("x-tag").iter().count(), 2);
    }

    #[test]
    fn test_malformed_header_rejected() {
        let mut cli = base_cli();
        cli.headers = vec!["no-colon-here".to_string()];
        assert!(matches!(load_config(&cli), Err(AppError::Parse(_))));
    }

    #[test]
    fn test_literal_body() {
        let mut cli = base_cli();
        cli.body = Some("{\"k\":1}".to_string());
        let config = load_config(&cli).unwrap();
        assert_eq!(config.spec.body, b"{\"k\":1}");
    }

    #[test]
    fn test_body_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"payload-bytes").unwrap();
        let mut cli = base_cli();
        cli.body = Some(format!("@{}", file.path().display()));
        let config = load_config(&cli).unwrap();
        assert_eq!(config.spec.body, b"payload-bytes");
    }

    #[test]
    fn test_missing_body_file_rejected() {
        let mut cli = base_cli();
        cli.body = Some("@/nonexistent/body.json".to_string());
        assert!(matches!(load_config(&cli), Err(AppError::Io(_))));
    }

    #[test]
    fn test_invalid_format_rejected() {
        let mut cli = base_cli();
        cli.format = "yaml".to_string();
        assert!(matches!(
            load_config(&cli),
            Err(AppError::Validation(_))
        ));
    }
}
