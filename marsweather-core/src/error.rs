use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by [`crate::MaasClient`].
#[derive(Debug, Error)]
pub enum Error {
    /// The configured HTTP transport could not be built.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Invalid proxy URL '{url}': {source}")]
    InvalidProxy {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Connection failure, timeout, or an interrupted body read.
    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-2xx status.
    #[error("{endpoint} responded with status {status}: {body}")]
    Status {
        endpoint: String,
        status: StatusCode,
        body: String,
    },

    /// The body was not JSON of the expected shape.
    #[error("Failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// True for network failures and non-2xx responses.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. } | Error::Status { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }

    /// Endpoint the failing request was sent to, if any.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Error::Transport { endpoint, .. }
            | Error::Status { endpoint, .. }
            | Error::Decode { endpoint, .. } => Some(endpoint.as_str()),
            Error::ClientBuild(_) | Error::InvalidProxy { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
