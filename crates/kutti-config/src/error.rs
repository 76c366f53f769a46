use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("config file name must not be empty")]
    EmptyName,

    #[error("config file name must be a bare file name: {0:?}")]
    NotBareName(String),

    #[error("cannot resolve config directory: {0}")]
    Workspace(#[from] kutti_platform::Error),

    #[error("failed to read config file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write config file {}: {source}", path.display())]
    Write {
        path:   PathBuf,
        source: kutti_fs::Error,
    },

    #[error("failed to encode config '{name}': {source}")]
    Encode { name: String, source: BoxError },

    /// The stored bytes could not be decoded. By the time this is returned the
    /// payload has already been reset to defaults and re-saved.
    #[error("failed to decode config '{name}': {source}")]
    Decode { name: String, source: BoxError },
}

impl Error {
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }
}
