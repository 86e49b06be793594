use std::sync::Arc;

use serde_json::Value;

use crate::config::DEFAULT_EXPLORER_URL;
use crate::error::Result;
use crate::transport::Transport;
use crate::url::EndpointUrl;

use super::{default_transport, BlockId, RestBase};

/// Blockchain explorer API routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplorerEndpoint {
    BlockchainData,
    CirculatingSupply,
    CurrentBlockHeight,
    GeneratedSupply,
    LastBlockData,
    TransactionData,
    TransactionConfirmations,
    VerifyReserveProof,
    CreateIntegratedAddress,
}

impl ExplorerEndpoint {
    pub const fn path(self) -> &'static str {
        match self {
            Self::BlockchainData => "getblockchaindata",
            Self::CirculatingSupply => "getcirculatingsupply",
            Self::CurrentBlockHeight => "getcurrentblockheight",
            Self::GeneratedSupply => "getgeneratedsupply",
            Self::LastBlockData => "getlastblockdata",
            Self::TransactionData => "gettransactiondata",
            Self::TransactionConfirmations => "gettransactionconfirmations",
            Self::VerifyReserveProof => "verifyreserveproofapi",
            Self::CreateIntegratedAddress => "createintegratedaddressapi",
        }
    }
}

/// Client for the public blockchain explorer.
#[derive(Clone)]
pub struct BlockchainExplorer {
    rest: RestBase,
}

impl BlockchainExplorer {
    pub fn new() -> Result<Self> {
        Self::with_base(DEFAULT_EXPLORER_URL)
    }

    pub fn with_base(base_api: &str) -> Result<Self> {
        Self::with_transport(base_api, default_transport()?)
    }

    pub fn with_transport(base_api: &str, transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self {
            rest: RestBase::new(base_api, transport)?,
        })
    }

    pub fn base_api(&self) -> &EndpointUrl {
        self.rest.base()
    }

    pub fn set_base_api(&mut self, base_api: &str) -> Result<()> {
        self.rest.set_base(base_api)
    }

    async fn fetch(
        &self,
        endpoint: ExplorerEndpoint,
        query: &[(&str, Option<String>)],
    ) -> Result<Value> {
        self.rest.get(endpoint.path(), query).await
    }

    /// Overall and latest blockchain data.
    pub async fn get_blockchain_data(&self) -> Result<Value> {
        self.fetch(ExplorerEndpoint::BlockchainData, &[]).await
    }

    pub async fn get_circulating_supply(&self) -> Result<Value> {
        self.fetch(ExplorerEndpoint::CirculatingSupply, &[]).await
    }

    pub async fn get_current_block_height(&self) -> Result<Value> {
        self.fetch(ExplorerEndpoint::CurrentBlockHeight, &[]).await
    }

    pub async fn get_generated_supply(&self) -> Result<Value> {
        self.fetch(ExplorerEndpoint::GeneratedSupply, &[]).await
    }

    pub async fn get_last_block_data(&self) -> Result<Value> {
        self.fetch(ExplorerEndpoint::LastBlockData, &[]).await
    }

    /// Block details by height or hash.
    pub async fn get_block_data(&self, block: impl Into<BlockId>) -> Result<Value> {
        let block = block.into();
        self.fetch(
            ExplorerEndpoint::LastBlockData,
            &[("block_data", Some(block.to_string()))],
        )
        .await
    }

    pub async fn get_transaction_data(&self, tx_hash: &str) -> Result<Value> {
        self.fetch(
            ExplorerEndpoint::TransactionData,
            &[("tx_hash", Some(tx_hash.to_owned()))],
        )
        .await
    }

    pub async fn get_transaction_confirmations(&self, tx_hash: &str) -> Result<Value> {
        self.fetch(
            ExplorerEndpoint::TransactionConfirmations,
            &[("tx_hash", Some(tx_hash.to_owned()))],
        )
        .await
    }

    /// Verify a reserve proof. `data` is whatever message the proof was
    /// created with, if any.
    pub async fn get_reserve_proof_verification(
        &self,
        public_address: &str,
        reserve_proof: &str,
        data: Option<&str>,
    ) -> Result<Value> {
        self.fetch(
            ExplorerEndpoint::VerifyReserveProof,
            &[
                ("public_address", Some(public_address.to_owned())),
                ("reserve_proof", Some(reserve_proof.to_owned())),
                ("data", data.map(str::to_owned)),
            ],
        )
        .await
    }

    /// Without a `payment_id` the explorer generates one.
    pub async fn generate_integrated_address(
        &self,
        public_address: &str,
        payment_id: Option<&str>,
    ) -> Result<Value> {
        self.fetch(
            ExplorerEndpoint::CreateIntegratedAddress,
            &[
                ("public_address", Some(public_address.to_owned())),
                ("payment_id", payment_id.map(str::to_owned)),
            ],
        )
        .await
    }
}
