use serde_json::{Map, Value};

use crate::error::{ParamError, Result};
use crate::params::destinations::normalize_destinations;
use crate::params::schema::{self, ParamSchema};

use super::{NamedParams, WalletRpc};

/// Ring members mixed into each input unless the caller says otherwise.
pub const DEFAULT_MIXIN: u32 = 20;
pub const DEFAULT_PRIORITY: u32 = 0;

/// Which outputs `incoming_transfers` lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferType {
    All,
    /// Not yet spent.
    Available,
    /// Already spent.
    Unavailable,
}

impl TransferType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Available => "available",
            Self::Unavailable => "unavailable",
        }
    }
}

fn atomic_destinations(destinations: &[Value]) -> Result<Value, ParamError> {
    let normalized = normalize_destinations(destinations)?;
    serde_json::to_value(normalized)
        .map_err(|e| ParamError::InvalidArgument(format!("encode destinations: {e}")))
}

/// Base transfer params, then the caller's checked extras, then the
/// normalized destinations.
fn transfer_params(
    schema: &ParamSchema,
    destinations: &[Value],
    priority: u32,
    mixin: u32,
    extra: Map<String, Value>,
) -> Result<Map<String, Value>, ParamError> {
    let mut params = NamedParams::new()
        .with("mixin", mixin)
        .with("unlock_time", 0)
        .with("priority", priority)
        .with("get_tx_key", true)
        .into_map();
    schema.merge_into(&mut params, extra)?;
    params.insert("destinations".to_owned(), atomic_destinations(destinations)?);
    Ok(params)
}

impl WalletRpc {
    /// Send to one or more `{"address", "amount"}` destinations, amounts in
    /// display units.
    ///
    /// `extra` may carry any key of [`schema::TRANSFER`]; it is validated
    /// before anything is sent and overrides the defaults.
    pub async fn transfer(
        &self,
        destinations: &[Value],
        priority: u32,
        mixin: u32,
        extra: Map<String, Value>,
    ) -> Result<Value> {
        let params = transfer_params(&schema::TRANSFER, destinations, priority, mixin, extra)?;
        self.call("transfer", params).await
    }

    /// Like [`transfer`](Self::transfer), but lets the wallet split the
    /// payment over several transactions.
    pub async fn transfer_split(
        &self,
        destinations: &[Value],
        priority: u32,
        mixin: u32,
        extra: Map<String, Value>,
    ) -> Result<Value> {
        let params = transfer_params(
            &schema::TRANSFER_SPLIT,
            destinations,
            priority,
            mixin,
            extra,
        )?;
        self.call("transfer_split", params).await
    }

    /// Sign an unsigned transaction set from a view-only wallet.
    pub async fn sign_transfer(&self, unsigned_txset: &str, export_raw: bool) -> Result<Value> {
        let params = NamedParams::new().with("unsigned_txset", unsigned_txset);
        let params = if export_raw {
            params.with("export_raw", true)
        } else {
            params
        };
        self.call("sign_transfer", params).await
    }

    /// Submit a transaction set previously signed with `sign_transfer`.
    pub async fn submit_transfer(&self, tx_data_hex: &str) -> Result<Value> {
        self.call(
            "submit_transfer",
            NamedParams::new().with("tx_data_hex", tx_data_hex),
        )
        .await
    }

    /// Send all dust outputs back to the wallet.
    pub async fn sweep_dust(&self, extra: Map<String, Value>) -> Result<Value> {
        schema::SWEEP_DUST.check(&extra)?;
        self.call("sweep_dust", extra).await
    }

    /// Send the whole unlocked balance of `account_index` to `address`.
    pub async fn sweep_all(
        &self,
        address: &str,
        account_index: u32,
        mixin: u32,
        extra: Map<String, Value>,
    ) -> Result<Value> {
        let mut params = NamedParams::new()
            .with("address", address)
            .with("account_index", account_index)
            .with("mixin", mixin)
            .into_map();
        schema::SWEEP_ALL.merge_into(&mut params, extra)?;
        self.call("sweep_all", params).await
    }

    pub async fn sweep_single(
        &self,
        destinations: &[Value],
        account_index: u32,
        mixin: u32,
        extra: Map<String, Value>,
    ) -> Result<Value> {
        schema::SWEEP_SINGLE.check(&extra)?;
        let mut params = NamedParams::new()
            .with("destinations", atomic_destinations(destinations)?)
            .with("mixin", mixin)
            .with("account_index", account_index)
            .into_map();
        params.extend(extra);
        self.call("sweep_single", params).await
    }

    /// Relay a transaction created with `do_not_relay`.
    pub async fn relay_tx(&self, hex: &str) -> Result<Value> {
        self.call("relay_tx", NamedParams::new().with("hex", hex))
            .await
    }

    // ==============================================================================
    // Payments and History
    // ==============================================================================

    pub async fn get_payments(&self, payment_id: &str) -> Result<Value> {
        self.call(
            "get_payments",
            NamedParams::new().with("payment_id", payment_id),
        )
        .await
    }

    pub async fn get_bulk_payments(
        &self,
        payment_ids: &[String],
        min_block_height: u64,
    ) -> Result<Value> {
        self.call(
            "get_bulk_payments",
            NamedParams::new()
                .with("payment_ids", payment_ids.to_vec())
                .with("min_block_height", min_block_height),
        )
        .await
    }

    pub async fn incoming_transfers(
        &self,
        transfer_type: TransferType,
        account_index: u32,
        subaddr_indices: Option<&[u32]>,
        verbose: bool,
    ) -> Result<Value> {
        self.call(
            "incoming_transfers",
            NamedParams::new()
                .with("transfer_type", transfer_type.as_str())
                .with("account_index", account_index)
                .with_opt("subaddr_indices", subaddr_indices.map(<[u32]>::to_vec))
                .with("verbose", verbose),
        )
        .await
    }

    /// Transfer history, filtered by any key of [`schema::GET_TRANSFERS`].
    pub async fn get_transfers(&self, extra: Map<String, Value>) -> Result<Value> {
        schema::GET_TRANSFERS.check(&extra)?;
        self.call("get_transfers", extra).await
    }

    pub async fn get_transfer_by_txid(&self, txid: &str, account_index: u32) -> Result<Value> {
        self.call(
            "get_transfer_by_txid",
            NamedParams::new()
                .with("txid", txid)
                .with("account_index", account_index),
        )
        .await
    }
}
