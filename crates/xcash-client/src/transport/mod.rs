//! HTTP transport abstraction layer.
//!
//! Defines the [`Transport`] trait that every endpoint client issues its
//! requests through, the [`HttpTransport`] implementation over `reqwest`,
//! and [`process`], which turns a raw response into decoded JSON or a
//! classified failure. A recording test double lives in `mock::MockTransport`.

mod http_adapter;
#[cfg(test)]
pub mod mock;

pub use http_adapter::HttpTransport;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{StatusCode, Url};

use crate::error::{Error, Result};

/// A raw HTTP response, before status classification and JSON decoding.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub url: String,
    pub status: StatusCode,
    pub body: String,
}

/// One GET or POST per call, no retries.
///
/// Implementations map "could not connect" failures to
/// [`Error::Connection`]; every other failure to produce a response is an
/// [`Error::Transport`]. Non-200 statuses are not errors at this layer:
/// they are returned as-is for [`process`] to classify.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` with JSON `Accept`/`Content-Type` headers.
    async fn get(&self, url: &Url) -> Result<RawResponse>;

    /// POST `body`, serialized to a JSON string, with exactly `headers`.
    async fn post(
        &self,
        url: &Url,
        body: &serde_json::Value,
        headers: &HeaderMap,
    ) -> Result<RawResponse>;
}

/// Decode the body of a 200 response; anything else is an [`Error::Http`].
pub fn process(response: RawResponse) -> Result<serde_json::Value> {
    let RawResponse { url, status, body } = response;
    if status != StatusCode::OK {
        return Err(Error::Http {
            url,
            status,
            reason: status.canonical_reason().unwrap_or("Unknown Status"),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| Error::InvalidResponse {
        origin: url,
        message: format!("decode JSON body: {e}"),
    })
}

/// GET `url` and [`process`] the response.
pub(crate) async fn get_json(transport: &dyn Transport, url: &Url) -> Result<serde_json::Value> {
    let response = transport.get(url).await?;
    process(response)
}
