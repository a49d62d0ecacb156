//! Minimal blocking HTTP client on libcurl, shared by the configuration
//! resource and the activity log.
//!
//! Calls block the current thread; wrap them in `spawn_blocking` from async code.

use anyhow::{Context, Result};
use std::time::Duration;

/// Connection settings for the console backend.
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    /// Base URL without trailing slash, e.g. `http://localhost:3000`.
    pub base_url: String,
    /// Optional API token sent as `Authorization: Token <token>`.
    pub token: Option<String>,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl HttpEndpoint {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            timeout,
        }
    }

    /// Joins `path` (leading slash optional) onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Status code and body of a completed request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a GET request.
pub fn get(endpoint: &HttpEndpoint, path: &str, headers: &[(&str, &str)]) -> Result<HttpResponse> {
    perform(endpoint, path, headers, None)
}

/// Performs a POST request with a JSON body.
pub fn post_json(
    endpoint: &HttpEndpoint,
    path: &str,
    headers: &[(&str, &str)],
    body: &[u8],
) -> Result<HttpResponse> {
    perform(endpoint, path, headers, Some(body))
}

fn perform(
    endpoint: &HttpEndpoint,
    path: &str,
    headers: &[(&str, &str)],
    post_body: Option<&[u8]>,
) -> Result<HttpResponse> {
    let url = endpoint.url(path);
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(&url).context("invalid URL")?;
    easy.follow_location(true)?;
    easy.connect_timeout(Duration::from_secs(15).min(endpoint.timeout))?;
    easy.timeout(endpoint.timeout)?;

    let mut list = curl::easy::List::new();
    list.append("Accept: application/json")?;
    if let Some(token) = &endpoint.token {
        list.append(&format!("Authorization: Token {}", token.trim()))?;
    }
    for (k, v) in headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
    }
    if let Some(data) = post_body {
        list.append("Content-Type: application/json")?;
        easy.post(true)?;
        easy.post_fields_copy(data)?;
    }
    easy.http_headers(list)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer
            .perform()
            .with_context(|| format!("request to {} failed", url))?;
    }

    let status = easy.response_code().context("no response code")?;
    tracing::debug!(url = %url, status, bytes = body.len(), "http request completed");
    Ok(HttpResponse { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_paths() {
        let ep = HttpEndpoint::new("http://host:3000/", None, Duration::from_secs(1));
        assert_eq!(ep.base_url, "http://host:3000");
        assert_eq!(ep.url("/api/v1/x"), "http://host:3000/api/v1/x");
        assert_eq!(ep.url("api/v1/x"), "http://host:3000/api/v1/x");
    }

    #[test]
    fn success_range() {
        let ok = HttpResponse { status: 204, body: Vec::new() };
        let redirect = HttpResponse { status: 302, body: Vec::new() };
        let err = HttpResponse { status: 500, body: Vec::new() };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
        assert!(!err.is_success());
    }
}
