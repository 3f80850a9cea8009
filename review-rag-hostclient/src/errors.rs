//! Crate-wide error hierarchy, ported from `mr-reviewer::errors`: a single
//! root error plus a provider-aware `HostError` that maps HTTP status codes
//! onto named variants (401 -> Unauthorized, 429 -> RateLimited, 5xx ->
//! Server, ...).

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error("config error: {0}")]
    Config(String),

    #[error("unsupported diff url: {0}")]
    UnrecognizedDiffUrl(String),
}

/// Host-specific failure, independent of which provider raised it.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("rate limited")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("server error: status {0}")]
    Server(u16),

    #[error("http status error: {0}")]
    HttpStatus(u16),

    #[error("timeout")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Host(HostError::from(e))
    }
}

impl From<reqwest::Error> for HostError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return HostError::Timeout;
        }
        if let Some(status) = e.status() {
            let code = status.as_u16();
            return match code {
                401 => HostError::Unauthorized,
                403 => HostError::Forbidden,
                404 => HostError::NotFound,
                429 => HostError::RateLimited { retry_after_secs: None },
                500..=599 => HostError::Server(code),
                _ => HostError::HttpStatus(code),
            };
        }
        HostError::Network(e.to_string())
    }
}
