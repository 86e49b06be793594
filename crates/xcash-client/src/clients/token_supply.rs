//! wXCASH supply via a third-party block explorer REST API.

use std::fmt;
use std::sync::Arc;

use reqwest::Url;
use serde_json::Value;
use tracing::debug;

use crate::config::{DEFAULT_TOKEN_EXPLORER_URL, WXCASH_CONTRACT};
use crate::error::Result;
use crate::transport::{get_json, Transport};
use crate::url::parse_absolute;

#[derive(Clone)]
pub struct TokenSupply {
    api: Url,
    contract: String,
    api_key: String,
    transport: Arc<dyn Transport>,
}

impl TokenSupply {
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_contract(api_key, DEFAULT_TOKEN_EXPLORER_URL, WXCASH_CONTRACT)
    }

    pub fn with_contract(api_key: &str, api: &str, contract: &str) -> Result<Self> {
        Self::with_transport(api_key, api, contract, super::default_transport()?)
    }

    pub fn with_transport(
        api_key: &str,
        api: &str,
        contract: &str,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        Ok(Self {
            api: parse_absolute(api)?,
            contract: contract.to_owned(),
            api_key: api_key.to_owned(),
            transport,
        })
    }

    pub fn contract(&self) -> &str {
        &self.contract
    }

    /// Total token supply as reported by the explorer, in 18-decimal base
    /// units.
    pub async fn supply(&self) -> Result<Value> {
        debug!(token.contract = %self.contract, "token supply lookup");
        let mut url = self.api.clone();
        url.query_pairs_mut()
            .append_pair("module", "stats")
            .append_pair("action", "tokensupply")
            .append_pair("contractaddress", &self.contract)
            .append_pair("apikey", &self.api_key);
        get_json(self.transport.as_ref(), &url).await
    }
}

impl fmt::Debug for TokenSupply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSupply")
            .field("api", &self.api.as_str())
            .field("contract", &self.contract)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}
