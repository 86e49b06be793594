//! Async client for the X-Cash block explorer, the delegate websites, the
//! node and wallet daemons' JSON-RPC interfaces, and the wXCASH token
//! supply.
//!
//! Every operation performs one HTTP round trip and returns the decoded
//! JSON body exactly as the remote service sent it. Caller input is
//! validated locally first (see [`params`]), so malformed transfers and
//! unsupported options never reach the network.

pub mod clients;
pub mod config;
pub mod error;
pub mod jsonrpc;
pub mod params;
pub mod transport;
pub mod url;

pub use clients::{
    Amount, Ban, BanTarget, BlockId, BlockchainExplorer, Clients, DaemonRpc, DelegatesExplorer,
    SharedDelegate, TokenSupply, WalletRpc,
};
pub use config::{Endpoints, HttpConfig};
pub use error::{Error, ParamError, Result};
pub use transport::{HttpTransport, RawResponse, Transport};
