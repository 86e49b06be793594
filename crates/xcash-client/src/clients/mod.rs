//! One client per remote service.
//!
//! Every public operation builds a URL or JSON-RPC envelope, performs one
//! round trip through a [`Transport`], and hands the decoded body back
//! untouched.

pub mod daemon;
pub mod delegates;
pub mod explorer;
pub mod shared_delegate;
pub mod token_supply;
pub mod wallet;

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use crate::config::Endpoints;
use crate::error::Result;
use crate::jsonrpc::Params;
use crate::transport::{get_json, HttpTransport, Transport};
use crate::url::EndpointUrl;

pub use daemon::{Ban, BanTarget, DaemonRpc};
pub use delegates::DelegatesExplorer;
pub use explorer::BlockchainExplorer;
pub use shared_delegate::{Amount, SharedDelegate};
pub use token_supply::TokenSupply;
pub use wallet::WalletRpc;

pub(crate) fn default_transport() -> Result<Arc<dyn Transport>> {
    Ok(Arc::new(HttpTransport::new()?))
}

/// A block addressed either by height or by hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockId {
    Height(u64),
    Hash(String),
}

impl From<u64> for BlockId {
    fn from(height: u64) -> Self {
        Self::Height(height)
    }
}

impl From<&str> for BlockId {
    fn from(hash: &str) -> Self {
        Self::Hash(hash.to_owned())
    }
}

impl From<String> for BlockId {
    fn from(hash: String) -> Self {
        Self::Hash(hash)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Height(height) => write!(f, "{height}"),
            Self::Hash(hash) => f.write_str(hash),
        }
    }
}

// ==============================================================================
// Shared GET plumbing
// ==============================================================================

/// A `/`-terminated base address plus the transport used to reach it.
#[derive(Clone)]
pub(crate) struct RestBase {
    base: EndpointUrl,
    transport: Arc<dyn Transport>,
}

impl RestBase {
    pub(crate) fn new(base: &str, transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self {
            base: EndpointUrl::parse(base)?,
            transport,
        })
    }

    pub(crate) fn base(&self) -> &EndpointUrl {
        &self.base
    }

    pub(crate) fn set_base(&mut self, base: &str) -> Result<()> {
        self.base = EndpointUrl::parse(base)?;
        Ok(())
    }

    pub(crate) fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    pub(crate) async fn get(&self, path: &str, query: &[(&str, Option<String>)]) -> Result<Value> {
        debug!(api.path = path, api.query = query.len(), "api call");
        let url = self.base.join(path, query)?;
        get_json(self.transport.as_ref(), &url).await
    }
}

// ==============================================================================
// Named JSON-RPC parameters
// ==============================================================================

/// Builder for by-name params where optional members are left out rather
/// than sent as `null`.
#[derive(Debug, Default)]
pub(crate) struct NamedParams(Map<String, Value>);

impl NamedParams {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_owned(), value.into());
        self
    }

    pub(crate) fn with_opt<V: Into<Value>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    pub(crate) fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<NamedParams> for Params {
    fn from(params: NamedParams) -> Self {
        Params::ByName(params.0)
    }
}

// ==============================================================================
// Client set
// ==============================================================================

/// Every fixed-address client, built from one [`Endpoints`] value and
/// sharing one transport.
#[derive(Clone)]
pub struct Clients {
    pub explorer: BlockchainExplorer,
    pub delegates: DelegatesExplorer,
    pub daemon: DaemonRpc,
    pub wallet: WalletRpc,
    token_explorer: String,
    transport: Arc<dyn Transport>,
}

impl Clients {
    pub fn from_endpoints(endpoints: &Endpoints, transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self {
            explorer: BlockchainExplorer::with_transport(&endpoints.explorer, transport.clone())?,
            delegates: DelegatesExplorer::with_transport(&endpoints.delegates, transport.clone())?,
            daemon: DaemonRpc::with_transport(&endpoints.daemon, transport.clone())?,
            wallet: WalletRpc::with_transport(&endpoints.wallet, transport.clone())?,
            token_explorer: endpoints.token_explorer.clone(),
            transport,
        })
    }

    /// Token supply lookups against the configured token explorer.
    pub fn token_supply(&self, api_key: &str) -> Result<TokenSupply> {
        TokenSupply::with_transport(
            api_key,
            &self.token_explorer,
            crate::config::WXCASH_CONTRACT,
            self.transport.clone(),
        )
    }

    /// A shared delegate client on the same transport. No probe request is
    /// made; see [`SharedDelegate::connect`] for that.
    pub fn shared_delegate(&self, delegate_url: &str) -> Result<SharedDelegate> {
        SharedDelegate::with_transport(delegate_url, self.transport.clone())
    }
}
