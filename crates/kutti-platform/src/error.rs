use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot determine the user {0} directory")]
    NoUserDir(&'static str),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("invalid subdirectory name: {0}")]
    InvalidSubdir(String),

    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("command failed: {cmd}, source: {source}")]
    CommandFailed { cmd: String, source: std::io::Error },

    #[error("command exited with {}: {cmd}", code.map_or_else(|| "signal".to_string(), |c| c.to_string()))]
    ExitStatus {
        cmd:    String,
        code:   Option<i32>,
        output: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
