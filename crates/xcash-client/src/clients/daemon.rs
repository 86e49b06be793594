use std::sync::Arc;

use serde_json::{json, Value};

use crate::config::DEFAULT_DAEMON_RPC_URL;
use crate::error::{ParamError, Result};
use crate::jsonrpc::{Params, RpcChannel};
use crate::transport::Transport;
use crate::url::parse_absolute;

use super::{default_transport, BlockId, NamedParams};

/// The peer a [`Ban`] applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BanTarget {
    /// Host name or dotted IP string.
    Host(String),
    /// IPv4 address as the daemon's 32-bit integer.
    Ip(u32),
}

/// One entry of a `set_bans` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ban {
    pub target: BanTarget,
    /// `false` lifts an existing ban.
    pub ban: bool,
    pub seconds: u64,
}

impl Ban {
    pub fn host(host: impl Into<String>, seconds: u64) -> Self {
        Self {
            target: BanTarget::Host(host.into()),
            ban: true,
            seconds,
        }
    }

    pub fn unban(target: BanTarget) -> Self {
        Self {
            target,
            ban: false,
            seconds: 0,
        }
    }

    fn to_value(&self) -> Value {
        let mut entry = match &self.target {
            BanTarget::Host(host) => json!({ "host": host }),
            BanTarget::Ip(ip) => json!({ "ip": ip }),
        };
        entry["ban"] = json!(self.ban);
        entry["seconds"] = json!(self.seconds);
        entry
    }
}

/// Node daemon JSON-RPC client.
#[derive(Clone)]
pub struct DaemonRpc {
    channel: RpcChannel,
}

impl DaemonRpc {
    pub fn new() -> Result<Self> {
        Self::with_url(DEFAULT_DAEMON_RPC_URL)
    }

    pub fn with_url(rpc_url: &str) -> Result<Self> {
        Self::with_transport(rpc_url, default_transport()?)
    }

    pub fn with_transport(rpc_url: &str, transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self {
            channel: RpcChannel::new(parse_absolute(rpc_url)?, transport),
        })
    }

    pub fn rpc_url(&self) -> &reqwest::Url {
        self.channel.url()
    }

    async fn call(&self, method: &str, params: impl Into<Params>) -> Result<Value> {
        self.channel.call(method, Some(params.into())).await
    }

    async fn call_bare(&self, method: &str) -> Result<Value> {
        self.channel.call(method, None).await
    }

    // ==============================================================================
    // Blocks
    // ==============================================================================

    /// Number of blocks in the longest chain known to the node.
    pub async fn get_block_count(&self) -> Result<Value> {
        self.call_bare("get_block_count").await
    }

    pub async fn on_get_block_hash(&self, block_height: u64) -> Result<Value> {
        self.call("on_get_block_hash", vec![json!(block_height)])
            .await
    }

    /// A block template to mine on, paying the coinbase to `wallet_address`.
    pub async fn get_block_template(&self, wallet_address: &str, reserve_size: u64) -> Result<Value> {
        self.call(
            "get_block_template",
            NamedParams::new()
                .with("wallet_address", wallet_address)
                .with("reserve_size", reserve_size),
        )
        .await
    }

    /// Submit mined block blobs, sent positionally.
    pub async fn submit_block(&self, block_blobs: &[String]) -> Result<Value> {
        let blobs: Vec<Value> = block_blobs.iter().map(|b| json!(b)).collect();
        self.call("submit_block", blobs).await
    }

    pub async fn get_last_block_header(&self) -> Result<Value> {
        self.call_bare("get_last_block_header").await
    }

    pub async fn get_block_header_by_hash(&self, hash: &str) -> Result<Value> {
        self.call(
            "get_block_header_by_hash",
            NamedParams::new().with("hash", hash),
        )
        .await
    }

    pub async fn get_block_header_by_height(&self, height: u64) -> Result<Value> {
        self.call(
            "get_block_header_by_height",
            NamedParams::new().with("height", height),
        )
        .await
    }

    pub async fn get_block_headers_range(&self, start_height: u64, end_height: u64) -> Result<Value> {
        self.call(
            "get_block_headers_range",
            NamedParams::new()
                .with("start_height", start_height)
                .with("end_height", end_height),
        )
        .await
    }

    pub async fn get_block(&self, block: impl Into<BlockId>) -> Result<Value> {
        let params = match block.into() {
            BlockId::Height(height) => NamedParams::new().with("height", height),
            BlockId::Hash(hash) => NamedParams::new().with("hash", hash),
        };
        self.call("get_block", params).await
    }

    // ==============================================================================
    // Node and Network
    // ==============================================================================

    pub async fn get_connections(&self) -> Result<Value> {
        self.call_bare("get_connections").await
    }

    pub async fn get_info(&self) -> Result<Value> {
        self.call_bare("get_info").await
    }

    pub async fn hard_fork_info(&self) -> Result<Value> {
        self.call_bare("hard_fork_info").await
    }

    /// Ban or unban peers. An empty list is rejected locally.
    pub async fn set_bans(&self, bans: &[Ban]) -> Result<Value> {
        if bans.is_empty() {
            return Err(
                ParamError::InvalidArgument("set_bans needs at least one entry".to_owned()).into(),
            );
        }
        let bans: Vec<Value> = bans.iter().map(Ban::to_value).collect();
        self.call("set_bans", NamedParams::new().with("bans", bans))
            .await
    }

    pub async fn get_bans(&self) -> Result<Value> {
        self.call_bare("get_bans").await
    }

    pub async fn flush_txpool(&self) -> Result<Value> {
        self.call_bare("flush_txpool").await
    }

    /// Number of on-chain outputs per amount. RingCT outputs count as 0.
    pub async fn get_output_histogram(&self, amounts: &[u64]) -> Result<Value> {
        self.call(
            "get_output_histogram",
            NamedParams::new().with("amounts", amounts.to_vec()),
        )
        .await
    }

    /// Coinbase and fee totals for `count` blocks starting at `height`.
    pub async fn get_coinbase_tx_sum(&self, height: u64, count: u64) -> Result<Value> {
        self.call(
            "get_coinbase_tx_sum",
            NamedParams::new().with("height", height).with("count", count),
        )
        .await
    }

    pub async fn get_version(&self) -> Result<Value> {
        self.call_bare("get_version").await
    }

    /// Fee estimate per kB.
    pub async fn get_fee_estimate(&self) -> Result<Value> {
        self.call_bare("get_fee_estimate").await
    }

    pub async fn get_alternate_chains(&self) -> Result<Value> {
        self.call_bare("get_alternate_chains").await
    }

    /// Relay transactions by id, sent positionally.
    pub async fn relay_tx(&self, tx_ids: &[String]) -> Result<Value> {
        let ids: Vec<Value> = tx_ids.iter().map(|id| json!(id)).collect();
        self.call("relay_tx", ids).await
    }

    pub async fn sync_info(&self) -> Result<Value> {
        self.call_bare("sync_info").await
    }
}
