use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("source is not a regular file: {}", .0.display())]
    SourceNotRegular(PathBuf),

    #[error("destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    #[error("destination is a directory: {}", .0.display())]
    DestinationIsDirectory(PathBuf),

    #[error("staging file already exists: {}", .0.display())]
    StagingExists(PathBuf),

    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,

    #[error("failed to read from source: {0}")]
    SourceRead(#[source] io::Error),

    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to remove {}: {source}", path.display())]
    Remove { path: PathBuf, source: io::Error },

    #[error("failed to publish {} as {}: {source}", from.display(), to.display())]
    Publish {
        from:   PathBuf,
        to:     PathBuf,
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The underlying I/O error, if this error wraps one.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Error::SourceRead(e) => Some(e),
            Error::Read { source, .. }
            | Error::Write { source, .. }
            | Error::Remove { source, .. }
            | Error::Publish { source, .. } => Some(source),
            _ => None,
        }
    }
}
