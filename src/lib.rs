//! HTTP client SDK for the Iterate survey platform.
//!
//! This crate provides a typed client for the hosted survey API: it builds
//! authenticated requests, submits a POST with a pre-serialized JSON body,
//! and decodes the `{results, error}` envelope every response arrives in.
//! Each call is a single asynchronous request/response transaction — no
//! retries, no caching, no queuing.
//!
//! # Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use iterate_client::{ApiClient, ClientConfig, Path};
//!
//! # async fn example() -> iterate_client::Result<()> {
//! let client = ApiClient::new(ClientConfig::new("your-api-key"));
//!
//! #[derive(serde::Deserialize)]
//! struct EmbedResults {
//!     survey: Option<serde_json::Value>,
//! }
//!
//! let context = Bytes::from_static(br#"{"user_traits":{"plan":"pro"}}"#);
//! let results: Option<EmbedResults> = client.post(Path::SurveyEmbed, context).await?;
//!
//! if let Some(results) = results {
//!     println!("survey: {:?}", results.survey);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! Every failure surfaces as one of five [`Error`] kinds: an invalid URL
//! (resolved before any request is issued), a transport failure, an empty
//! response body, an undecodable body, or an error the API reported inside
//! the envelope. All of them are terminal for that call.
//!
//! # Testing
//!
//! The client sends through the [`Transport`] trait. Production clients use
//! the process-wide [`HttpTransport`]; tests can inject a [`MockTransport`]
//! to script outcomes and inspect the requests that were issued.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{ApiClient, ClientConfig, DEFAULT_API_HOST};
pub use error::{Error, Result};
pub use transport::{ApiRequest, HttpTransport, MockTransport, Transport, TransportError};
pub use types::{Envelope, Path};
