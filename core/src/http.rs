//! Non-blocking HTTP transport for the movie client.
//!
//! # Design
//! `Transport` wraps a single async `reqwest::Client` configured with a base
//! URL and finite timeouts. It performs exactly one exchange per call and
//! surfaces completion as an async value. It does no status interpretation:
//! a 404 and a 500 are both *responses*. Only connection- and protocol-level
//! problems (refused, reset, premature close, malformed bytes, timeout) are
//! failures at this layer, and each maps to `ClientError::Transport`.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Method;

use crate::error::ClientError;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Transport configuration. Both timeouts default to finite values so the
/// client can never hang forever on a silent server.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub base_url: String,
    /// Deadline for establishing the TCP connection.
    pub connect_timeout: Duration,
    /// Deadline for the whole exchange after the connection is up. reqwest
    /// has no separate write timeout; this total deadline covers slow writes
    /// and slow reads alike.
    pub read_timeout: Duration,
}

impl TransportConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

/// One HTTP request described as plain data. Built fresh per facade call,
/// never reused.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: Method,
    /// Path relative to the configured base URL.
    pub path: String,
    /// Query parameters in insertion order.
    pub query: Vec<(String, String)>,
    /// JSON body, if the operation carries one.
    pub body: Option<String>,
}

impl RequestSpec {
    pub fn get(path: String) -> Self {
        Self::bare(Method::GET, path)
    }

    pub fn post(path: String, body: String) -> Self {
        Self {
            body: Some(body),
            ..Self::bare(Method::POST, path)
        }
    }

    pub fn put(path: String, body: String) -> Self {
        Self {
            body: Some(body),
            ..Self::bare(Method::PUT, path)
        }
    }

    pub fn delete(path: String) -> Self {
        Self::bare(Method::DELETE, path)
    }

    pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    fn bare(method: Method, path: String) -> Self {
        Self {
            method,
            path,
            query: Vec::new(),
            body: None,
        }
    }
}

/// A fully-received HTTP response: status, headers, raw body.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Async transport over a reqwest client. Opens a new logical request per
/// call; never retries.
#[derive(Debug)]
pub struct Transport {
    client: reqwest::Client,
    base_url: String,
}

impl Transport {
    pub fn new(config: TransportConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.read_timeout)
            .build()
            .map_err(ClientError::transport)?;
        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    /// Perform one HTTP exchange and collect the full response body.
    pub async fn execute(&self, spec: &RequestSpec) -> Result<RawResponse, ClientError> {
        let url = format!("{}{}", self.base_url, spec.path);
        let mut request = self.client.request(spec.method.clone(), &url);
        if !spec.query.is_empty() {
            request = request.query(&spec.query);
        }
        if let Some(body) = &spec.body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone());
        }

        tracing::debug!(method = %spec.method, %url, "sending request");
        let response = request.send().await.map_err(ClientError::transport)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        // The body stream can still fault mid-read (reset, stall past the
        // deadline); that is a transport failure, not a decode failure.
        let body = response.text().await.map_err(ClientError::transport)?;
        tracing::debug!(status, "response resolved");

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
