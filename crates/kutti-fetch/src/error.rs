//! Error types for kutti-fetch.

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request to {url} failed: {source}")]
    Request {
        url:    String,
        #[source]
        source: BoxError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] BoxError),

    #[error("{url} returned HTTP status {status}")]
    Status { url: String, status: u16 },

    #[error(transparent)]
    Transfer(#[from] kutti_fs::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
