use std::num::NonZeroU32;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Url;
use tracing::{debug, trace};

use crate::config::HttpConfig;
use crate::error::{Error, ParamError, Result};
use crate::url::redacted;

use super::{RawResponse, Transport};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

// ==============================================================================
// HttpTransport: reqwest-backed GET/POST
// ==============================================================================

/// [`Transport`] over a shared `reqwest::Client`.
///
/// Connection pooling is whatever `reqwest` does by default. With no
/// [`HttpConfig`] overrides there is no timeout and no rate limit.
pub struct HttpTransport {
    client: reqwest::Client,
    limiter: Option<DirectRateLimiter>,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpConfig::default())
    }

    /// If `requests_per_second` is set, every outbound request waits for
    /// the limiter before it is sent.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(connect_timeout) = config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::InvalidConfig(format!("build HTTP client: {e}")))?;

        let limiter = match config.requests_per_second {
            None => None,
            Some(limit) => {
                let limit = NonZeroU32::new(limit).ok_or_else(|| {
                    Error::InvalidConfig("requests_per_second must be at least 1".to_owned())
                })?;
                Some(RateLimiter::direct(Quota::per_second(limit)))
            }
        };

        Ok(Self { client, limiter })
    }

    async fn wait_for_rate_limit(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }

    async fn send(&self, url: &Url, request: reqwest::RequestBuilder) -> Result<RawResponse> {
        self.wait_for_rate_limit().await;
        let shown = redacted(url);

        let response = request.send().await.map_err(|source| {
            if source.is_connect() {
                Error::Connection {
                    url: shown.clone(),
                    source: source.without_url(),
                }
            } else {
                Error::Transport {
                    url: shown.clone(),
                    source: source.without_url(),
                }
            }
        })?;
        let status = response.status();

        let body = response.text().await.map_err(|source| Error::Transport {
            url: shown.clone(),
            source: source.without_url(),
        })?;
        debug!(http.url = %shown, %status, body_len = body.len(), "http response");
        trace!(http.url = %shown, body = %body, "http response body");

        Ok(RawResponse {
            url: shown,
            status,
            body,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<RawResponse> {
        debug!(http.method = "GET", http.url = %redacted(url), "http request");
        let request = self
            .client
            .get(url.clone())
            .header(header::ACCEPT, HeaderValue::from_static("application/json"))
            .header(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        self.send(url, request).await
    }

    async fn post(
        &self,
        url: &Url,
        body: &serde_json::Value,
        headers: &HeaderMap,
    ) -> Result<RawResponse> {
        let payload = serde_json::to_string(body)
            .map_err(|e| ParamError::InvalidArgument(format!("encode request body: {e}")))?;
        debug!(
            http.method = "POST",
            http.url = %redacted(url),
            body_len = payload.len(),
            "http request"
        );
        let request = self
            .client
            .post(url.clone())
            .headers(headers.clone())
            .body(payload);
        self.send(url, request).await
    }
}
