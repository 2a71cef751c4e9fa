use thiserror::Error;

use crate::source::Endpoint;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: Endpoint, status: u16 },

    #[error("Invalid payload from {endpoint}: {message}")]
    Decode { endpoint: Endpoint, message: String },

    #[error("Timed out after {0:?} waiting for data sources")]
    Timeout(std::time::Duration),

    #[error("Invalid URL: {0}")]
    UrlParse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether a view may offer a manual retry after this error.
    /// Transport-side failures are recoverable; configuration faults are not.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::Status { .. } | Error::Decode { .. } | Error::Timeout(_)
        )
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::UrlParse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
