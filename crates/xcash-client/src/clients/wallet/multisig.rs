use serde_json::Value;

use crate::error::Result;

use super::{NamedParams, WalletRpc};

impl WalletRpc {
    pub async fn is_multisig(&self) -> Result<Value> {
        self.call_bare("is_multisig").await
    }

    /// First step of multisig setup: the string to share with the other
    /// participants.
    pub async fn prepare_multisig(&self) -> Result<Value> {
        self.call_bare("prepare_multisig").await
    }

    /// `threshold` signatures out of `multisig_info.len() + 1` participants.
    pub async fn make_multisig(
        &self,
        multisig_info: &[String],
        threshold: u32,
        password: &str,
    ) -> Result<Value> {
        self.call(
            "make_multisig",
            NamedParams::new()
                .with("multisig_info", multisig_info.to_vec())
                .with("threshold", threshold)
                .with("password", password),
        )
        .await
    }

    pub async fn export_multisig_info(&self) -> Result<Value> {
        self.call_bare("export_multisig_info").await
    }

    pub async fn import_multisig_info(&self, info: &[String]) -> Result<Value> {
        self.call(
            "import_multisig_info",
            NamedParams::new().with("info", info.to_vec()),
        )
        .await
    }

    /// Turn an N-1/N wallet into a usable multisig wallet.
    pub async fn finalize_multisig(&self, multisig_info: &[String], password: &str) -> Result<Value> {
        self.call(
            "finalize_multisig",
            NamedParams::new()
                .with("multisig_info", multisig_info.to_vec())
                .with("password", password),
        )
        .await
    }

    pub async fn sign_multisig(&self, tx_data_hex: &str) -> Result<Value> {
        self.call(
            "sign_multisig",
            NamedParams::new().with("tx_data_hex", tx_data_hex),
        )
        .await
    }

    pub async fn submit_multisig(&self, tx_data_hex: &str) -> Result<Value> {
        self.call(
            "submit_multisig",
            NamedParams::new().with("tx_data_hex", tx_data_hex),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::test_support::wallet;
    use crate::transport::mock::MockTransport;

    #[tokio::test]
    async fn multisig_setup_flow() {
        let mock = MockTransport::builder()
            .with_json(json!({"id": "0", "jsonrpc": "2.0", "result": {"multisig_info": "MultisigV1abc"}}))
            .build();
        let client = wallet(&mock);

        let prepared = client.prepare_multisig().await.expect("mock call succeeds");
        assert_eq!(prepared["result"]["multisig_info"], "MultisigV1abc");
        assert_eq!(
            mock.last_body(),
            json!({"jsonrpc": "2.0", "id": "0", "method": "prepare_multisig"})
        );

        let peers = ["MultisigV1peer1".to_owned(), "MultisigV1peer2".to_owned()];
        client
            .make_multisig(&peers, 2, "pw")
            .await
            .expect("mock call succeeds");
        assert_eq!(
            mock.last_body()["params"],
            json!({"multisig_info": ["MultisigV1peer1", "MultisigV1peer2"], "threshold": 2, "password": "pw"})
        );

        client
            .finalize_multisig(&peers, "pw")
            .await
            .expect("mock call succeeds");
        assert_eq!(mock.last_body()["method"], "finalize_multisig");
    }

    #[tokio::test]
    async fn multisig_signing_flow() {
        let mock = MockTransport::builder().build();
        let client = wallet(&mock);

        client
            .import_multisig_info(&["info1".to_owned()])
            .await
            .expect("mock call succeeds");
        assert_eq!(mock.last_body()["params"], json!({"info": ["info1"]}));

        client.sign_multisig("txhex").await.expect("mock call succeeds");
        assert_eq!(mock.last_body()["params"], json!({"tx_data_hex": "txhex"}));

        client.submit_multisig("txhex2").await.expect("mock call succeeds");
        assert_eq!(mock.last_body()["method"], "submit_multisig");

        client.is_multisig().await.expect("mock call succeeds");
        client.export_multisig_info().await.expect("mock call succeeds");
        assert!(mock.last_body().get("params").is_none());
    }
}
