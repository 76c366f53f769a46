//! Filesystem primitives for kutti.
//!
//! - [`atomic_write`] replaces a small file in one rename.
//! - [`transfer`] streams any reader into a staged file and publishes it only
//!   when every byte has landed, with optional progress callbacks.
//! - [`copy_file`] / [`copy_file_with_progress`] apply the transfer to a
//!   local regular file.

mod error;
mod primitives;
pub mod transfer;

pub use error::{Error, Result};
pub use primitives::{AtomicWriteOptions, atomic_read, atomic_write, remove_file};
pub use transfer::{
    DEFAULT_CHUNK_SIZE, Progress, ProgressFn, TransferOptions, check_destination, copy_file,
    copy_file_with_progress, transfer,
};
