//! Wallet daemon JSON-RPC client.
//!
//! Split by concern: accounts and wallet files here, transfers in
//! `transfers`, keys/proofs/outputs in `keys`, and multisig in `multisig`.

mod keys;
mod multisig;
mod transfers;

use std::sync::Arc;

use serde_json::Value;

use crate::config::DEFAULT_WALLET_RPC_URL;
use crate::error::Result;
use crate::jsonrpc::{Params, RpcChannel};
use crate::transport::Transport;
use crate::url::parse_absolute;

use super::{default_transport, NamedParams};

pub use keys::KeyType;
pub use transfers::{TransferType, DEFAULT_MIXIN, DEFAULT_PRIORITY};

#[derive(Clone)]
pub struct WalletRpc {
    channel: RpcChannel,
}

impl WalletRpc {
    pub fn new() -> Result<Self> {
        Self::with_url(DEFAULT_WALLET_RPC_URL)
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
    // Accounts and Addresses
    // ==============================================================================

    /// Balance of `account_index`, optionally broken down for the given
    /// subaddresses.
    pub async fn get_balance(
        &self,
        account_index: u32,
        address_indices: Option<&[u32]>,
    ) -> Result<Value> {
        self.call(
            "get_balance",
            NamedParams::new()
                .with("account_index", account_index)
                .with_opt("address_indices", address_indices.map(<[u32]>::to_vec)),
        )
        .await
    }

    pub async fn get_address(
        &self,
        account_index: u32,
        address_index: Option<&[u32]>,
    ) -> Result<Value> {
        self.call(
            "get_address",
            NamedParams::new()
                .with("account_index", account_index)
                .with_opt("address_index", address_index.map(<[u32]>::to_vec)),
        )
        .await
    }

    /// Account and subaddress index of `address`.
    pub async fn get_address_index(&self, address: &str) -> Result<Value> {
        self.call(
            "get_address_index",
            NamedParams::new().with("address", address),
        )
        .await
    }

    pub async fn create_address(&self, account_index: u32, label: Option<&str>) -> Result<Value> {
        self.call(
            "create_address",
            NamedParams::new()
                .with("account_index", account_index)
                .with_opt("label", label),
        )
        .await
    }

    /// Label subaddress `minor` of account `major`.
    pub async fn label_address(&self, major: u32, minor: u32, label: &str) -> Result<Value> {
        self.call(
            "label_address",
            NamedParams::new()
                .with("index", serde_json::json!({"major": major, "minor": minor}))
                .with("label", label),
        )
        .await
    }

    pub async fn get_accounts(&self, tag: Option<&str>) -> Result<Value> {
        self.call("get_accounts", NamedParams::new().with_opt("tag", tag))
            .await
    }

    pub async fn create_account(&self, label: Option<&str>) -> Result<Value> {
        self.call("create_account", NamedParams::new().with_opt("label", label))
            .await
    }

    pub async fn label_account(&self, account_index: u32, label: &str) -> Result<Value> {
        self.call(
            "label_account",
            NamedParams::new()
                .with("account_index", account_index)
                .with("label", label),
        )
        .await
    }

    pub async fn get_account_tags(&self) -> Result<Value> {
        self.call_bare("get_account_tags").await
    }

    pub async fn tag_accounts(&self, tag: &str, accounts: &[u32]) -> Result<Value> {
        self.call(
            "tag_accounts",
            NamedParams::new()
                .with("tag", tag)
                .with("accounts", accounts.to_vec()),
        )
        .await
    }

    pub async fn untag_accounts(&self, accounts: &[u32]) -> Result<Value> {
        self.call(
            "untag_accounts",
            NamedParams::new().with("accounts", accounts.to_vec()),
        )
        .await
    }

    pub async fn set_account_tag_description(&self, tag: &str, description: &str) -> Result<Value> {
        self.call(
            "set_account_tag_description",
            NamedParams::new()
                .with("tag", tag)
                .with("description", description),
        )
        .await
    }

    /// The wallet's view of the chain height. It may trail the daemon after
    /// the wallet has been offline.
    pub async fn get_wallet_height(&self) -> Result<Value> {
        self.call_bare("get_height").await
    }

    // ==============================================================================
    // Wallet Files
    // ==============================================================================

    /// Save the wallet file.
    pub async fn store(&self) -> Result<Value> {
        self.call_bare("store").await
    }

    pub async fn stop_wallet(&self) -> Result<Value> {
        self.call_bare("stop_wallet").await
    }

    /// Rescan from scratch, losing anything not recoverable from the chain
    /// (tx keys, notes, destination addresses).
    pub async fn rescan_blockchain(&self) -> Result<Value> {
        self.call_bare("rescan_blockchain").await
    }

    pub async fn rescan_spent(&self) -> Result<Value> {
        self.call_bare("rescan_spent").await
    }

    pub async fn refresh_wallet(&self, start_height: Option<u64>) -> Result<Value> {
        self.call(
            "refresh",
            NamedParams::new().with_opt("start_height", start_height),
        )
        .await
    }

    pub async fn get_languages(&self) -> Result<Value> {
        self.call_bare("get_languages").await
    }

    /// Needs the wallet daemon started with `--wallet-dir`.
    pub async fn create_wallet(&self, filename: &str, password: &str, language: &str) -> Result<Value> {
        self.call(
            "create_wallet",
            NamedParams::new()
                .with("filename", filename)
                .with("password", password)
                .with("language", language),
        )
        .await
    }

    /// Needs the wallet daemon started with `--wallet-dir`.
    pub async fn open_wallet(&self, filename: &str, password: &str) -> Result<Value> {
        self.call(
            "open_wallet",
            NamedParams::new()
                .with("filename", filename)
                .with("password", password),
        )
        .await
    }

    pub async fn close_wallet(&self) -> Result<Value> {
        self.call_bare("close_wallet").await
    }

    pub async fn change_wallet_password(&self, old_password: &str, new_password: &str) -> Result<Value> {
        self.call(
            "change_wallet_password",
            NamedParams::new()
                .with("old_password", old_password)
                .with("new_password", new_password),
        )
        .await
    }

    /// RPC version as `major << 16 | minor`.
    pub async fn get_version(&self) -> Result<Value> {
        self.call_bare("get_version").await
    }
}
