//! JSON-RPC 2.0 envelopes and the POST channel shared by the daemon and
//! wallet clients.

use std::sync::Arc;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Url;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, ParamError, Result};
use crate::transport::{process, Transport};

pub const JSONRPC_VERSION: &str = "2.0";

/// Every call is awaited to completion before the next, so no correlation
/// between requests is needed and the id is fixed.
pub const REQUEST_ID: &str = "0";

// ==============================================================================
// Envelope
// ==============================================================================

/// Named (`{..}`) or positional (`[..]`) call parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Params {
    ByName(serde_json::Map<String, serde_json::Value>),
    ByPosition(Vec<serde_json::Value>),
}

impl Params {
    /// Wrap a JSON object as named params. Any other value becomes a single
    /// positional param.
    pub fn named(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => Self::ByName(map),
            other => Self::ByPosition(vec![other]),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::ByName(map) => map.is_empty(),
            Self::ByPosition(list) => list.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::ByName(map) => map.len(),
            Self::ByPosition(list) => list.len(),
        }
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Params {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Self::ByName(map)
    }
}

impl From<Vec<serde_json::Value>> for Params {
    fn from(list: Vec<serde_json::Value>) -> Self {
        Self::ByPosition(list)
    }
}

/// `{"jsonrpc":"2.0","id":"0","method":..,"params":..}`.
///
/// `params` is left out entirely when there are none; the daemons reject
/// a `null` params member for zero-argument methods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<'a> {
    jsonrpc: &'static str,
    id: &'static str,
    method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<Params>,
}

impl<'a> Envelope<'a> {
    pub fn new(method: &'a str, params: Option<Params>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: REQUEST_ID,
            method,
            params: params.filter(|p| !p.is_empty()),
        }
    }

    pub fn method(&self) -> &str {
        self.method
    }

    pub fn params(&self) -> Option<&Params> {
        self.params.as_ref()
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| {
            ParamError::InvalidArgument(format!("encode `{}` params: {e}", self.method)).into()
        })
    }
}

// ==============================================================================
// Channel
// ==============================================================================

/// A JSON-RPC endpoint URL plus the transport used to reach it.
#[derive(Clone)]
pub struct RpcChannel {
    url: Url,
    transport: Arc<dyn Transport>,
    headers: HeaderMap,
}

impl RpcChannel {
    pub fn new(url: Url, transport: Arc<dyn Transport>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        Self {
            url,
            transport,
            headers,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// POST one envelope and return the decoded response body verbatim,
    /// including any JSON-RPC `error` member.
    pub async fn call(&self, method: &str, params: Option<Params>) -> Result<serde_json::Value> {
        let envelope = Envelope::new(method, params);
        debug!(
            rpc.method = envelope.method(),
            rpc.params = envelope.params().map_or(0, Params::len),
            "rpc call"
        );
        let body = envelope.to_value()?;
        let response = self.transport.post(&self.url, &body, &self.headers).await?;
        process(response)
    }
}

// ==============================================================================
// Response Helpers
// ==============================================================================

/// Unwrap a JSON-RPC response body: the `result` member, or the `error`
/// member as [`Error::Server`].
///
/// Clients return bodies untouched; callers that want the typed split opt
/// in through this function.
pub fn into_result(response: serde_json::Value) -> Result<serde_json::Value> {
    let mut body = match response {
        serde_json::Value::Object(body) => body,
        other => {
            return Err(Error::InvalidResponse {
                origin: "JSON-RPC envelope".to_owned(),
                message: format!("expected an object, got {other}"),
            })
        }
    };

    match body.remove("error") {
        Some(serde_json::Value::Null) | None => {}
        Some(err) => return Err(parse_jsonrpc_error(err)),
    }

    Ok(body.remove("result").unwrap_or(serde_json::Value::Null))
}

/// `{"code": <int>, "message": <string>}` becomes [`Error::Server`];
/// any other shape is reported as an invalid response.
fn parse_jsonrpc_error(err: serde_json::Value) -> Error {
    #[derive(serde::Deserialize)]
    struct JsonRpcError {
        code: i64,
        message: String,
    }

    match serde_json::from_value::<JsonRpcError>(err.clone()) {
        Ok(parsed) => Error::Server {
            code: parsed.code,
            message: parsed.message,
        },
        Err(_) => Error::InvalidResponse {
            origin: "JSON-RPC envelope".to_owned(),
            message: format!("non-standard JSON-RPC error: {err}"),
        },
    }
}
