use std::sync::Arc;

use serde_json::Value;

use crate::config::DEFAULT_DELEGATES_URL;
use crate::error::Result;
use crate::transport::Transport;
use crate::url::EndpointUrl;

use super::{default_transport, RestBase};

/// Delegate registry website routes. Every per-delegate route takes its
/// argument as `parameter1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegatesEndpoint {
    WebsiteStatistics,
    Delegates,
    DelegateStatistics,
    DelegateInformation,
    DelegateVoterList,
    RoundStatistics,
}

impl DelegatesEndpoint {
    pub const fn path(self) -> &'static str {
        match self {
            Self::WebsiteStatistics => "delegateswebsitegetstatistics",
            Self::Delegates => "getdelegates",
            Self::DelegateStatistics => "getdelegatesstatistics",
            Self::DelegateInformation => "getdelegatesinformation",
            Self::DelegateVoterList => "getdelegatesvoterslist",
            Self::RoundStatistics => "getroundstatistics",
        }
    }
}

/// Client for the delegate registry website.
#[derive(Clone)]
pub struct DelegatesExplorer {
    rest: RestBase,
}

impl DelegatesExplorer {
    pub fn new() -> Result<Self> {
        Self::with_base(DEFAULT_DELEGATES_URL)
    }

    pub fn with_base(base_url: &str) -> Result<Self> {
        Self::with_transport(base_url, default_transport()?)
    }

    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self {
            rest: RestBase::new(base_url, transport)?,
        })
    }

    pub fn base_url(&self) -> &EndpointUrl {
        self.rest.base()
    }

    async fn fetch(&self, endpoint: DelegatesEndpoint, parameter1: Option<String>) -> Result<Value> {
        self.rest
            .get(endpoint.path(), &[("parameter1", parameter1)])
            .await
    }

    pub async fn get_delegate_website_statistics(&self) -> Result<Value> {
        self.fetch(DelegatesEndpoint::WebsiteStatistics, None).await
    }

    pub async fn get_all_delegates(&self) -> Result<Value> {
        self.fetch(DelegatesEndpoint::Delegates, None).await
    }

    /// `delegate` is a delegate name or public address.
    pub async fn get_delegate_statistics(&self, delegate: &str) -> Result<Value> {
        self.fetch(
            DelegatesEndpoint::DelegateStatistics,
            Some(delegate.to_owned()),
        )
        .await
    }

    pub async fn get_delegate_information(&self, delegate: &str) -> Result<Value> {
        self.fetch(
            DelegatesEndpoint::DelegateInformation,
            Some(delegate.to_owned()),
        )
        .await
    }

    pub async fn get_delegate_voter_list(&self, delegate: &str) -> Result<Value> {
        self.fetch(
            DelegatesEndpoint::DelegateVoterList,
            Some(delegate.to_owned()),
        )
        .await
    }

    /// Round statistics, including the reserve bytes, for the block at
    /// `block_height`.
    pub async fn get_round_statistics(&self, block_height: u64) -> Result<Value> {
        self.fetch(
            DelegatesEndpoint::RoundStatistics,
            Some(block_height.to_string()),
        )
        .await
    }
}
