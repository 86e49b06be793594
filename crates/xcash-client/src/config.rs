//! Default endpoint addresses and HTTP client settings.
//!
//! Everything here is a plain value with `Default` and `Deserialize`, so an
//! embedding application can load it from whatever config source it owns.

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_EXPLORER_URL: &str = "https://explorer.xcash.foundation/";
pub const DEFAULT_DELEGATES_URL: &str = "http://delegates.xcash.foundation/";
pub const DEFAULT_DAEMON_RPC_URL: &str = "http://localhost:18281/json_rpc";
pub const DEFAULT_WALLET_RPC_URL: &str = "http://localhost:18285/json_rpc";
pub const DEFAULT_TOKEN_EXPLORER_URL: &str = "https://api.polygonscan.com/api";

/// wXCASH token contract on Polygon.
pub const WXCASH_CONTRACT: &str = "0x235328f864f38a91f0d2282159ea7c7b7c9f7c62";

// ==============================================================================
// HTTP Settings
// ==============================================================================

/// Settings for the underlying `reqwest` client.
///
/// Every field is optional and unset by default: no connect timeout, no
/// request timeout, no rate limit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(with = "opt_secs")]
    pub connect_timeout: Option<Duration>,
    #[serde(with = "opt_secs")]
    pub timeout: Option<Duration>,
    /// Upper bound on outbound requests per second, shared by every client
    /// built on the same transport.
    pub requests_per_second: Option<u32>,
}

impl HttpConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn with_rate_limit(mut self, requests_per_second: u32) -> Self {
        self.requests_per_second = Some(requests_per_second);
        self
    }
}

// Timeouts are written as whole seconds in config files.
mod opt_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
    }
}

// ==============================================================================
// Endpoint Addresses
// ==============================================================================

/// Base addresses for every remote service, defaulting to the public
/// foundation hosts and the local daemon/wallet ports.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub explorer: String,
    pub delegates: String,
    pub daemon: String,
    pub wallet: String,
    pub token_explorer: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            explorer: DEFAULT_EXPLORER_URL.to_owned(),
            delegates: DEFAULT_DELEGATES_URL.to_owned(),
            daemon: DEFAULT_DAEMON_RPC_URL.to_owned(),
            wallet: DEFAULT_WALLET_RPC_URL.to_owned(),
            token_explorer: DEFAULT_TOKEN_EXPLORER_URL.to_owned(),
        }
    }
}
