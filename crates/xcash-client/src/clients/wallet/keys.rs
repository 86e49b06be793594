use serde_json::{Map, Value};

use crate::error::Result;
use crate::params::schema;
use crate::params::units::to_atomic;

use super::{NamedParams, WalletRpc};

/// Secret material `query_key` can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    /// Older wallets have none.
    Mnemonic,
    ViewKey,
    SpendKey,
}

impl KeyType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mnemonic => "mnemonic",
            Self::ViewKey => "view_key",
            Self::SpendKey => "spend_key",
        }
    }
}

impl WalletRpc {
    pub async fn query_key(&self, key_type: KeyType) -> Result<Value> {
        self.call(
            "query_key",
            NamedParams::new().with("key_type", key_type.as_str()),
        )
        .await
    }

    // ==============================================================================
    // Integrated Addresses and URIs
    // ==============================================================================

    /// Without a `standard_address` the wallet's primary address is used;
    /// without a `payment_id` a random one is generated.
    pub async fn make_integrated_address(
        &self,
        standard_address: Option<&str>,
        payment_id: Option<&str>,
    ) -> Result<Value> {
        self.call(
            "make_integrated_address",
            NamedParams::new()
                .with_opt("standard_address", standard_address)
                .with_opt("payment_id", payment_id),
        )
        .await
    }

    pub async fn split_integrated_address(&self, integrated_address: &str) -> Result<Value> {
        self.call(
            "split_integrated_address",
            NamedParams::new().with("integrated_address", integrated_address),
        )
        .await
    }

    /// Payment URI for `address`; `extra` may carry any key of
    /// [`schema::MAKE_URI`].
    pub async fn make_uri(&self, address: &str, extra: Map<String, Value>) -> Result<Value> {
        let mut params = NamedParams::new().with("address", address).into_map();
        schema::MAKE_URI.merge_into(&mut params, extra)?;
        self.call("make_uri", params).await
    }

    pub async fn parse_uri(&self, uri: &str) -> Result<Value> {
        self.call("parse_uri", NamedParams::new().with("uri", uri))
            .await
    }

    // ==============================================================================
    // Address Book
    // ==============================================================================

    /// Address book entries by index.
    pub async fn get_address_book(&self, entries: &[u64]) -> Result<Value> {
        self.call(
            "get_address_book",
            NamedParams::new().with("entries", entries.to_vec()),
        )
        .await
    }

    pub async fn add_address_book(
        &self,
        address: &str,
        payment_id: Option<&str>,
        description: &str,
    ) -> Result<Value> {
        self.call(
            "add_address_book",
            NamedParams::new()
                .with("address", address)
                .with_opt("payment_id", payment_id)
                .with("description", description),
        )
        .await
    }

    pub async fn delete_address_book(&self, index: u64) -> Result<Value> {
        self.call(
            "delete_address_book",
            NamedParams::new().with("index", index),
        )
        .await
    }

    // ==============================================================================
    // Proofs and Signatures
    // ==============================================================================

    pub async fn get_tx_key(&self, txid: &str) -> Result<Value> {
        self.call("get_tx_key", NamedParams::new().with("txid", txid))
            .await
    }

    pub async fn check_tx_key(&self, txid: &str, tx_key: &str, address: &str) -> Result<Value> {
        self.call(
            "check_tx_key",
            NamedParams::new()
                .with("txid", txid)
                .with("tx_key", tx_key)
                .with("address", address),
        )
        .await
    }

    /// Prove a payment to `address`, optionally bound to `message`.
    pub async fn get_tx_proof(&self, txid: &str, address: &str, message: Option<&str>) -> Result<Value> {
        self.call(
            "get_tx_proof",
            NamedParams::new()
                .with("txid", txid)
                .with("address", address)
                .with_opt("message", message),
        )
        .await
    }

    pub async fn check_tx_proof(
        &self,
        txid: &str,
        address: &str,
        signature: &str,
        message: Option<&str>,
    ) -> Result<Value> {
        self.call(
            "check_tx_proof",
            NamedParams::new()
                .with("txid", txid)
                .with("address", address)
                .with("signature", signature)
                .with_opt("message", message),
        )
        .await
    }

    /// Prove a spend without revealing the destination.
    pub async fn get_spend_proof(&self, txid: &str, message: Option<&str>) -> Result<Value> {
        self.call(
            "get_spend_proof",
            NamedParams::new()
                .with("txid", txid)
                .with_opt("message", message),
        )
        .await
    }

    pub async fn check_spend_proof(
        &self,
        txid: &str,
        signature: &str,
        message: Option<&str>,
    ) -> Result<Value> {
        self.call(
            "check_spend_proof",
            NamedParams::new()
                .with("txid", txid)
                .with("signature", signature)
                .with_opt("message", message),
        )
        .await
    }

    /// Prove the wallet holds at least `amount` (display units) in
    /// `account_index`, or its whole balance when `all` is set.
    pub async fn get_reserve_proof(
        &self,
        account_index: u32,
        amount: f64,
        all: bool,
        message: Option<&str>,
    ) -> Result<Value> {
        let atomic = to_atomic(amount)?;
        self.call(
            "get_reserve_proof",
            NamedParams::new()
                .with("account_index", account_index)
                .with("amount", atomic)
                .with("all", all)
                .with_opt("message", message),
        )
        .await
    }

    pub async fn check_reserve_proof(
        &self,
        address: &str,
        signature: &str,
        message: Option<&str>,
    ) -> Result<Value> {
        self.call(
            "check_reserve_proof",
            NamedParams::new()
                .with("address", address)
                .with("signature", signature)
                .with_opt("message", message),
        )
        .await
    }

    /// Sign `data` with the wallet's spend key.
    pub async fn sign(&self, data: &str) -> Result<Value> {
        self.call("sign", NamedParams::new().with("data", data))
            .await
    }

    pub async fn verify(&self, data: &str, address: &str, signature: &str) -> Result<Value> {
        self.call(
            "verify",
            NamedParams::new()
                .with("data", data)
                .with("address", address)
                .with("signature", signature),
        )
        .await
    }

    // ==============================================================================
    // Notes and Attributes
    // ==============================================================================

    /// `notes[i]` is attached to `txids[i]`.
    pub async fn set_tx_notes(&self, txids: &[String], notes: &[String]) -> Result<Value> {
        self.call(
            "set_tx_notes",
            NamedParams::new()
                .with("txids", txids.to_vec())
                .with("notes", notes.to_vec()),
        )
        .await
    }

    pub async fn get_tx_notes(&self, txids: &[String]) -> Result<Value> {
        self.call(
            "get_tx_notes",
            NamedParams::new().with("txids", txids.to_vec()),
        )
        .await
    }

    pub async fn set_attribute(&self, key: &str, value: &str) -> Result<Value> {
        self.call(
            "set_attribute",
            NamedParams::new().with("key", key).with("value", value),
        )
        .await
    }

    pub async fn get_attribute(&self, key: &str) -> Result<Value> {
        self.call("get_attribute", NamedParams::new().with("key", key))
            .await
    }

    // ==============================================================================
    // Outputs and Key Images
    // ==============================================================================

    pub async fn export_outputs(&self) -> Result<Value> {
        self.call_bare("export_outputs").await
    }

    pub async fn import_outputs(&self, outputs_data_hex: &str) -> Result<Value> {
        self.call(
            "import_outputs",
            NamedParams::new().with("outputs_data_hex", outputs_data_hex),
        )
        .await
    }

    pub async fn export_key_images(&self) -> Result<Value> {
        self.call_bare("export_key_images").await
    }

    /// `signed_key_images` as returned by `export_key_images`:
    /// `{"key_image", "signature"}` objects.
    pub async fn import_key_images(&self, signed_key_images: &[Value]) -> Result<Value> {
        self.call(
            "import_key_images",
            NamedParams::new().with("signed_key_images", signed_key_images.to_vec()),
        )
        .await
    }
}
