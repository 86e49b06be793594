use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::transport::Transport;
use crate::url::EndpointUrl;

use super::{default_transport, RestBase};

/// Shared delegate API routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharedDelegateEndpoint {
    WebsiteStatistics,
    BlocksFound,
    PublicAddressInformation,
    PublicAddressPaymentInformation,
    DelegateVoterList,
}

impl SharedDelegateEndpoint {
    pub const fn path(self) -> &'static str {
        match self {
            Self::WebsiteStatistics => "shareddelegateswebsitegetstatistics",
            Self::BlocksFound => "getblocksfound",
            Self::PublicAddressInformation => "getpublicaddressinformation",
            Self::PublicAddressPaymentInformation => "getpublicaddresspaymentinformation",
            Self::DelegateVoterList => "getdelegatesvoterslist",
        }
    }
}

/// How many entries a paged listing returns, counted from `start`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Amount {
    #[default]
    All,
    Count(u64),
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Count(n) => write!(f, "{n}"),
        }
    }
}

/// Client for one shared delegate's website API.
#[derive(Clone)]
pub struct SharedDelegate {
    rest: RestBase,
}

impl SharedDelegate {
    /// Normalize `delegate_url` without contacting it.
    pub fn new(delegate_url: &str) -> Result<Self> {
        Self::with_transport(delegate_url, default_transport()?)
    }

    pub fn with_transport(delegate_url: &str, transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self {
            rest: RestBase::new(delegate_url, transport)?,
        })
    }

    /// Like [`new`](Self::new), but first checks that the delegate answers
    /// at all. Any HTTP response counts; only an unreachable host fails,
    /// with [`Error::Connection`].
    pub async fn connect(delegate_url: &str) -> Result<Self> {
        Self::connect_with_transport(delegate_url, default_transport()?).await
    }

    pub async fn connect_with_transport(
        delegate_url: &str,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let client = Self::with_transport(delegate_url, transport)?;
        let probe = client
            .rest
            .transport()
            .get(client.rest.base().as_url())
            .await?;
        debug!(delegate.url = %client.rest.base(), status = %probe.status, "shared delegate reachable");
        Ok(client)
    }

    pub fn delegate_url(&self) -> &EndpointUrl {
        self.rest.base()
    }

    async fn fetch(
        &self,
        endpoint: SharedDelegateEndpoint,
        query: &[(&str, Option<String>)],
    ) -> Result<Value> {
        self.rest.get(endpoint.path(), query).await
    }

    /// Blocks found by the delegate, `amount` entries from `start` (the
    /// website counts from 1).
    pub async fn get_blocks_found(&self, start: u64, amount: Amount) -> Result<Value> {
        self.fetch(
            SharedDelegateEndpoint::BlocksFound,
            &[
                ("start", Some(start.to_string())),
                ("amount", Some(amount.to_string())),
            ],
        )
        .await
    }

    /// Voters staking towards the delegate at `wallet_address`.
    ///
    /// With no address, the delegate's own `public_address` is looked up
    /// from its website statistics first, costing one extra request.
    pub async fn get_delegate_voter_list(&self, wallet_address: Option<&str>) -> Result<Value> {
        let address = match wallet_address {
            Some(address) => address.to_owned(),
            None => self.own_public_address().await?,
        };
        self.fetch(
            SharedDelegateEndpoint::DelegateVoterList,
            &[("parameter1", Some(address))],
        )
        .await
    }

    async fn own_public_address(&self) -> Result<String> {
        let statistics = self.get_delegate_website_statistic().await?;
        statistics
            .get("public_address")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| Error::InvalidResponse {
                origin: format!(
                    "{}{}",
                    self.rest.base(),
                    SharedDelegateEndpoint::WebsiteStatistics.path()
                ),
                message: "statistics carry no string `public_address`".to_owned(),
            })
    }

    pub async fn get_delegate_website_statistic(&self) -> Result<Value> {
        self.fetch(SharedDelegateEndpoint::WebsiteStatistics, &[])
            .await
    }

    /// Statistics for a voter that has staked on this delegate.
    pub async fn get_public_address_information(&self, public_address: &str) -> Result<Value> {
        self.fetch(
            SharedDelegateEndpoint::PublicAddressInformation,
            &[("public_address", Some(public_address.to_owned()))],
        )
        .await
    }

    pub async fn get_public_address_payment_information(
        &self,
        public_address: &str,
        start: u64,
        amount: Amount,
    ) -> Result<Value> {
        self.fetch(
            SharedDelegateEndpoint::PublicAddressPaymentInformation,
            &[
                ("public_address", Some(public_address.to_owned())),
                ("start", Some(start.to_string())),
                ("amount", Some(amount.to_string())),
            ],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::transport::mock::MockTransport;

    fn delegate(mock: &Arc<MockTransport>) -> SharedDelegate {
        SharedDelegate::with_transport("http://pool.test:18283", mock.clone()).expect("valid url")
    }

    #[test]
    fn amount_renders_all_or_count() {
        assert_eq!(Amount::default().to_string(), "all");
        assert_eq!(Amount::Count(25).to_string(), "25");
    }

    #[test]
    fn url_gains_trailing_slash() {
        let mock = MockTransport::builder().build();
        assert_eq!(delegate(&mock).delegate_url().to_string(), "http://pool.test:18283/");
    }

    #[tokio::test]
    async fn connect_probes_base_url_and_ignores_status() {
        let mock = MockTransport::builder()
            .with_status(StatusCode::NOT_FOUND, "")
            .build();
        let client = SharedDelegate::connect_with_transport("http://pool.test", mock.clone())
            .await
            .expect("any HTTP answer is reachable");
        assert_eq!(client.delegate_url().to_string(), "http://pool.test/");

        let probe = mock.last_request();
        assert_eq!(probe.method, "GET");
        assert_eq!(probe.url.as_str(), "http://pool.test/");
    }

    #[tokio::test]
    async fn new_makes_no_request() {
        let mock = MockTransport::builder().build();
        let _client = delegate(&mock);
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn paged_listings_send_start_and_amount() {
        let mock = MockTransport::builder().build();
        let client = delegate(&mock);
        client
            .get_blocks_found(1, Amount::All)
            .await
            .expect("mock call succeeds");
        client
            .get_public_address_payment_information("XCA1voter", 5, Amount::Count(10))
            .await
            .expect("mock call succeeds");
        client
            .get_public_address_information("XCA1voter")
            .await
            .expect("mock call succeeds");

        let urls: Vec<String> = mock.requests().iter().map(|r| r.url.to_string()).collect();
        assert_eq!(
            urls,
            [
                "http://pool.test:18283/getblocksfound?start=1&amount=all",
                "http://pool.test:18283/getpublicaddresspaymentinformation?public_address=XCA1voter&start=5&amount=10",
                "http://pool.test:18283/getpublicaddressinformation?public_address=XCA1voter",
            ]
        );
    }

    #[tokio::test]
    async fn voter_list_uses_given_address() {
        let mock = MockTransport::builder().build();
        delegate(&mock)
            .get_delegate_voter_list(Some("XCA1given"))
            .await
            .expect("mock call succeeds");
        assert_eq!(mock.requests().len(), 1);
        assert_eq!(
            mock.last_request().url.as_str(),
            "http://pool.test:18283/getdelegatesvoterslist?parameter1=XCA1given"
        );
    }

    #[tokio::test]
    async fn voter_list_falls_back_to_statistics_address() {
        let mock = MockTransport::builder()
            .with_json(json!({"public_address": "XCA1self", "delegate_name": "pool"}))
            .with_json(json!([{"public_address": "XCA1voter"}]))
            .build();
        let voters = delegate(&mock)
            .get_delegate_voter_list(None)
            .await
            .expect("fallback lookup succeeds");
        assert_eq!(voters, json!([{"public_address": "XCA1voter"}]));

        let urls: Vec<String> = mock.requests().iter().map(|r| r.url.to_string()).collect();
        assert_eq!(
            urls,
            [
                "http://pool.test:18283/shareddelegateswebsitegetstatistics",
                "http://pool.test:18283/getdelegatesvoterslist?parameter1=XCA1self",
            ]
        );
    }

    #[tokio::test]
    async fn voter_list_without_statistics_address_is_invalid_response() {
        let mock = MockTransport::builder()
            .with_json(json!({"delegate_name": "pool"}))
            .build();
        let err = delegate(&mock)
            .get_delegate_voter_list(None)
            .await
            .expect_err("no address to fall back to");
        assert!(matches!(err, Error::InvalidResponse { ref message, .. } if message.contains("public_address")));
        assert_eq!(mock.requests().len(), 1);
    }
}
