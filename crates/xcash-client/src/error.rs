use reqwest::StatusCode;

/// Argument validation failures, raised before any network call is made.
#[derive(Debug, thiserror::Error)]
pub enum ParamError {
    #[error("destination {index} is missing required parameter `{field}`")]
    MissingRequiredParameter { index: usize, field: &'static str },

    #[error("parameter `{key}` is not supported; allowed: {}", .allowed.join(", "))]
    ParamNotSupported {
        key: String,
        allowed: Vec<&'static str>,
    },

    #[error("destination {index}: amount must be a number, got {found}")]
    AmountTypeError { index: usize, found: String },

    #[error("destination {index}: address must be a string, got {found}")]
    AddressTypeError { index: usize, found: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not connect to {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    Http {
        url: String,
        status: StatusCode,
        reason: &'static str,
        body: String,
    },

    #[error("transport failure for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid response from {origin}: {message}")]
    InvalidResponse { origin: String, message: String },

    #[error("invalid endpoint address: {0}")]
    InvalidUrl(String),

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON-RPC server error {code}: {message}")]
    Server { code: i64, message: String },

    #[error(transparent)]
    Param(#[from] ParamError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
