//! Transport layer: how prepared requests reach the network.
//!
//! The client is written against the [`Transport`] trait rather than a
//! concrete HTTP stack, so tests can substitute a scripted implementation.
//! The production implementation is [`HttpTransport`], backed by a pooled
//! `reqwest::Client` shared process-wide.

use std::sync::{Arc, Mutex, OnceLock};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Method;
use thiserror::Error;
use url::Url;

/// A fully-prepared API request, ready for a [`Transport`] to execute.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute request URL.
    pub url: Url,
    /// Header name/value pairs, in insertion order.
    pub headers: Vec<(String, String)>,
    /// Raw request body, if any.
    pub body: Option<Bytes>,
}

impl ApiRequest {
    /// Look up a header value by name (ASCII case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Error produced by a transport when a request never yielded a body.
///
/// Covers connect, TLS, and body-read failures. A response that carried
/// bytes is never a transport error, whatever its status code.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(String);

impl TransportError {
    /// Create a transport error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self(format!("request timed out: {err}"))
        } else if err.is_connect() {
            Self(format!("connection failed: {err}"))
        } else {
            Self(err.to_string())
        }
    }
}

/// Executes prepared requests against the network.
///
/// Implementations return the raw response body whatever the HTTP status:
/// the survey API reports failures inside the response envelope, and the
/// client never inspects status codes.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute `request` and return the raw response body bytes.
    async fn send(&self, request: ApiRequest) -> Result<Bytes, TransportError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// HTTP Transport
// ─────────────────────────────────────────────────────────────────────────────

/// Production transport backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with its own connection pool.
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Create a transport over an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// The process-wide shared transport used by default-constructed clients.
    ///
    /// Every client built without an explicit transport shares this instance,
    /// and with it one connection pool.
    pub fn shared() -> Arc<HttpTransport> {
        static SHARED: OnceLock<Arc<HttpTransport>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(HttpTransport::new())).clone()
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Bytes, TransportError> {
        let ApiRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = self.http.request(method, url);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        tracing::debug!(status = %response.status(), "survey API responded");

        Ok(response.bytes().await?)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Mock Transport
// ─────────────────────────────────────────────────────────────────────────────

/// A scripted transport for tests.
///
/// Outcomes are returned in order; once exhausted, further sends fail with a
/// transport error. Every executed request is recorded for inspection.
#[derive(Debug)]
pub struct MockTransport {
    outcomes: Mutex<Vec<Result<Bytes, TransportError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    /// Create a mock transport with the given scripted outcomes.
    pub fn new(outcomes: Vec<Result<Bytes, TransportError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock transport that returns a single response body.
    pub fn with_body(body: impl Into<Bytes>) -> Self {
        Self::new(vec![Ok(body.into())])
    }

    /// Create a mock transport that fails its single send.
    pub fn with_error(message: impl Into<String>) -> Self {
        Self::new(vec![Err(TransportError::new(message))])
    }

    /// All requests that were executed against this transport.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The number of requests executed.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Bytes, TransportError> {
        self.requests.lock().unwrap().push(request);

        let mut outcomes = self.outcomes.lock().unwrap();
        if outcomes.is_empty() {
            return Err(TransportError::new(
                "MockTransport: no more outcomes scripted",
            ));
        }
        outcomes.remove(0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
