//! Survey API client.

use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Error, Result};
use crate::transport::{ApiRequest, HttpTransport, Transport};
use crate::types::{Envelope, Path};

/// API host used unless the configuration overrides it.
pub const DEFAULT_API_HOST: &str = "https://iteratehq.com/api/v1";

/// Content type attached to every request.
///
/// The hosted API expects this exact value; note that it is not
/// `application/json` even though every body is JSON.
const REQUEST_CONTENT_TYPE: &str = "application/javascript";

/// Configuration for an [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key; found in the Iterate dashboard.
    pub api_key: String,
    /// API host; `https://iteratehq.com/api/v1` under most circumstances.
    pub api_host: String,
}

impl ClientConfig {
    /// Create a configuration with the given API key, targeting the
    /// production host.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_host: DEFAULT_API_HOST.to_string(),
        }
    }

    /// Set a custom API host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = host.into();
        self
    }
}

/// Iterate survey API client.
///
/// Holds only immutable configuration and a shared transport, so a single
/// instance is cheap to clone and safe for concurrent callers. Construction
/// performs no I/O; each [`post`](ApiClient::post) issues exactly one
/// asynchronous request and resolves exactly once.
///
/// # Example
///
/// ```no_run
/// use bytes::Bytes;
/// use iterate_client::{ApiClient, ClientConfig, Path};
///
/// # async fn example() -> iterate_client::Result<()> {
/// let client = ApiClient::new(ClientConfig::new("your-api-key"));
///
/// #[derive(serde::Deserialize)]
/// struct EmbedResults {
///     survey: Option<serde_json::Value>,
/// }
///
/// let context = Bytes::from_static(br#"{"user_traits":{"plan":"pro"}}"#);
/// let results: Option<EmbedResults> = client.post(Path::SurveyEmbed, context).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Create a client over the process-wide shared transport.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            transport: HttpTransport::shared(),
        }
    }

    /// Substitute the transport the client sends through.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// The configured API host.
    pub fn api_host(&self) -> &str {
        &self.config.api_host
    }

    /// Make a POST request with the provided body and decode the enveloped
    /// results.
    ///
    /// `body` is an already-serialized JSON request body. On success the
    /// call resolves with the envelope's `results`, which the server may
    /// legitimately leave null; every failure resolves with one of the
    /// [`Error`] kinds. If the configured host does not form a valid URL,
    /// the call resolves without any request being issued.
    ///
    /// Requests are currently routed to [`Path::SurveyEmbed`] regardless of
    /// `path`: the argument names the endpoint the caller intends and is
    /// logged, but does not yet affect routing.
    pub async fn post<T: DeserializeOwned>(&self, path: Path, body: Bytes) -> Result<Option<T>> {
        tracing::debug!(requested = %path, "posting to survey API");

        // Every POST is routed to the survey embed endpoint, regardless of `path`.
        let mut request = self.request(Path::SurveyEmbed)?;
        request.method = Method::POST;
        request.body = Some(body);

        self.dispatch(request).await
    }

    /// Build a request for `path` with the proper content type and
    /// authentication.
    ///
    /// The URL is the plain concatenation of the configured host and the
    /// endpoint suffix; the method and body are left for the caller to set.
    fn request(&self, path: Path) -> Result<ApiRequest> {
        let url = Url::parse(&format!("{}{}", self.config.api_host, path))?;

        Ok(ApiRequest {
            method: Method::GET,
            url,
            headers: vec![
                (
                    CONTENT_TYPE.as_str().to_string(),
                    REQUEST_CONTENT_TYPE.to_string(),
                ),
                (
                    AUTHORIZATION.as_str().to_string(),
                    format!("Bearer {}", self.config.api_key),
                ),
            ],
            body: None,
        })
    }

    /// Execute a prepared request and decode the response envelope.
    ///
    /// Exactly one of five outcomes resolves, checked in order: transport
    /// failure, empty body, undecodable body, server-reported error, and
    /// finally the decoded results. No outcome is retried.
    async fn dispatch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<Option<T>> {
        tracing::debug!(method = %request.method, url = %request.url, "dispatching survey API request");

        let body = self.transport.send(request).await?;

        if body.is_empty() {
            return Err(Error::EmptyResponse);
        }

        let envelope: Envelope<T> = match serde_json::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::warn!(error = %err, "survey API response failed to decode");
                return Err(Error::Json(err));
            }
        };

        if let Some(message) = envelope.error {
            tracing::warn!(error = %message, "survey API reported an error");
            return Err(Error::Api(message));
        }

        Ok(envelope.results)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_host", &self.config.api_host)
            .finish()
    }
}
