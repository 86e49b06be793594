use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{StatusCode, Url};

use crate::error::Result;

use super::{RawResponse, Transport};

/// One request as seen by [`MockTransport`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: Url,
    pub body: Option<serde_json::Value>,
    pub headers: HeaderMap,
}

/// A transport double that records every request and replays canned
/// responses in order. Once the queue is empty it answers `200 {}`.
pub struct MockTransport {
    responses: Mutex<VecDeque<(StatusCode, String)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn builder() -> MockTransportBuilder {
        MockTransportBuilder {
            responses: VecDeque::new(),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("mock lock poisoned").clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests()
            .pop()
            .expect("mock transport received no requests")
    }

    /// Body of the most recent POST.
    pub fn last_body(&self) -> serde_json::Value {
        self.last_request()
            .body
            .expect("most recent request had no body")
    }

    fn respond(&self, request: RecordedRequest) -> RawResponse {
        let url = request.url.to_string();
        self.requests
            .lock()
            .expect("mock lock poisoned")
            .push(request);
        let (status, body) = self
            .responses
            .lock()
            .expect("mock lock poisoned")
            .pop_front()
            .unwrap_or((StatusCode::OK, "{}".to_owned()));
        RawResponse { url, status, body }
    }
}

pub struct MockTransportBuilder {
    responses: VecDeque<(StatusCode, String)>,
}

impl MockTransportBuilder {
    pub fn with_json(self, body: serde_json::Value) -> Self {
        self.with_status(StatusCode::OK, &body.to_string())
    }

    pub fn with_status(mut self, status: StatusCode, body: &str) -> Self {
        self.responses.push_back((status, body.to_owned()));
        self
    }

    pub fn build(self) -> Arc<MockTransport> {
        Arc::new(MockTransport {
            responses: Mutex::new(self.responses),
            requests: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &Url) -> Result<RawResponse> {
        Ok(self.respond(RecordedRequest {
            method: "GET",
            url: url.clone(),
            body: None,
            headers: HeaderMap::new(),
        }))
    }

    async fn post(
        &self,
        url: &Url,
        body: &serde_json::Value,
        headers: &HeaderMap,
    ) -> Result<RawResponse> {
        Ok(self.respond(RecordedRequest {
            method: "POST",
            url: url.clone(),
            body: Some(body.clone()),
            headers: headers.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_responses_in_order_then_falls_back_to_empty_object() {
        let mock = MockTransport::builder()
            .with_json(serde_json::json!({"n": 1}))
            .with_status(StatusCode::BAD_GATEWAY, "down")
            .build();
        let url = Url::parse("http://localhost/a").expect("static url");

        let first = mock.get(&url).await.expect("mock never fails");
        assert_eq!(first.status, StatusCode::OK);
        assert_eq!(first.body, r#"{"n":1}"#);

        let second = mock.get(&url).await.expect("mock never fails");
        assert_eq!(second.status, StatusCode::BAD_GATEWAY);

        let third = mock.get(&url).await.expect("mock never fails");
        assert_eq!(third.body, "{}");
        assert_eq!(mock.requests().len(), 3);
    }
}
