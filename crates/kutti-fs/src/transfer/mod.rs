//! Chunked, all-or-nothing byte transfers.
//!
//! Bytes are streamed into a [`Staging`] file next to the destination and
//! only renamed onto it once the source is exhausted. A failed transfer
//! leaves the destination exactly as it was.

mod staging;

pub use staging::{STAGING_SUFFIX, Staging, staging_path};

use std::fs::{self, File};
use std::io::{ErrorKind, Read};
use std::path::Path;

use tracing::debug;

use crate::{Error, Result};

pub const DEFAULT_CHUNK_SIZE: usize = 32 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferOptions {
    chunk_size: usize,
    overwrite:  bool,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferOptions {
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overwrite:  false,
        }
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn get_chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn get_overwrite(&self) -> bool {
        self.overwrite
    }
}

/// Snapshot handed to progress callbacks after every chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    /// Cumulative bytes written so far.
    pub transferred: u64,

    /// Expected size, when the source declares one. A download using chunked
    /// transfer encoding has no total.
    pub total: Option<u64>,
}

impl Progress {
    /// Returns `None` if the total is unknown or zero.
    #[must_use]
    pub fn percentage(&self) -> Option<f64> {
        self.total
            .filter(|&total| total > 0)
            .map(|total| (self.transferred as f64 / total as f64) * 100.0)
    }
}

/// Progress callback. Runs inline on the transferring thread.
pub type ProgressFn<'a> = &'a mut dyn FnMut(&Progress);

/// Fail early if `dest` cannot be the target of a transfer.
///
/// A directory is never replaced. An existing file is only replaced when
/// `overwrite` is set.
pub fn check_destination(dest: impl AsRef<Path>, overwrite: bool) -> Result<()> {
    let dest = dest.as_ref();
    match fs::symlink_metadata(dest) {
        Ok(meta) if meta.is_dir() => Err(Error::DestinationIsDirectory(dest.to_path_buf())),
        Ok(_) if !overwrite => Err(Error::DestinationExists(dest.to_path_buf())),
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(Error::Read {
            path: dest.to_path_buf(),
            source,
        }),
    }
}

/// Stream `source` into `dest` in chunks and publish it atomically.
///
/// Returns the number of bytes transferred.
pub fn transfer<R: Read>(
    mut source: R,
    dest: impl AsRef<Path>,
    total: Option<u64>,
    options: &TransferOptions,
    mut on_progress: Option<ProgressFn<'_>>,
) -> Result<u64> {
    let dest = dest.as_ref();
    if options.chunk_size == 0 {
        return Err(Error::InvalidChunkSize);
    }
    check_destination(dest, options.overwrite)?;

    let mut staging = Staging::create(dest)?;
    let mut buf = vec![0u8; options.chunk_size];
    let mut transferred = 0u64;

    loop {
        let n = match source.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::SourceRead(e)),
        };
        staging.write_all(&buf[..n])?;
        transferred += n as u64;

        if let Some(callback) = on_progress.as_deref_mut() {
            callback(&Progress { transferred, total });
        }
    }

    staging.publish()?;
    debug!(dest = %dest.display(), bytes = transferred, "transfer published");
    Ok(transferred)
}

/// Copy a regular file.
///
/// Fails with [`Error::DestinationExists`] when `dest` exists and
/// `overwrite` is false.
pub fn copy_file(
    src: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    chunk_size: usize,
    overwrite: bool,
) -> Result<u64> {
    let options = TransferOptions::new().chunk_size(chunk_size).overwrite(overwrite);
    copy_with(src.as_ref(), dest.as_ref(), &options, None)
}

/// [`copy_file`] reporting `(copied, source size)` after every chunk.
pub fn copy_file_with_progress(
    src: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    chunk_size: usize,
    overwrite: bool,
    mut on_progress: impl FnMut(&Progress),
) -> Result<u64> {
    let options = TransferOptions::new().chunk_size(chunk_size).overwrite(overwrite);
    copy_with(src.as_ref(), dest.as_ref(), &options, Some(&mut on_progress))
}

fn copy_with(
    src: &Path,
    dest: &Path,
    options: &TransferOptions,
    on_progress: Option<ProgressFn<'_>>,
) -> Result<u64> {
    let source = open_regular(src)?;
    let size = source
        .metadata()
        .map_err(|source| Error::Read {
            path: src.to_path_buf(),
            source,
        })?
        .len();

    debug!(src = %src.display(), dest = %dest.display(), size, "copying file");
    transfer(source, dest, Some(size), options, on_progress)
}

fn open_regular(src: &Path) -> Result<File> {
    let not_found_or = |source: std::io::Error| {
        if source.kind() == ErrorKind::NotFound {
            Error::SourceNotFound(src.to_path_buf())
        } else {
            Error::Read {
                path: src.to_path_buf(),
                source,
            }
        }
    };

    let meta = fs::metadata(src).map_err(not_found_or)?;
    if !meta.is_file() {
        return Err(Error::SourceNotRegular(src.to_path_buf()));
    }
    File::open(src).map_err(not_found_or)
}
