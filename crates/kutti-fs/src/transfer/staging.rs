use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{Error, Result};

pub const STAGING_SUFFIX: &str = ".download";

/// Path a transfer writes to before it is published as `dest`.
pub fn staging_path(dest: &Path) -> PathBuf {
    let mut name = OsString::from(dest.as_os_str());
    name.push(STAGING_SUFFIX);
    PathBuf::from(name)
}

/// A temporary file that becomes `dest` on [`Staging::publish`].
///
/// Dropping an unpublished staging file deletes it, so every early return or
/// unwind out of a transfer leaves nothing behind. The one exception is a
/// publish that removed the previous destination and then failed to rename:
/// the staging file is then the only copy left and is kept.
pub struct Staging {
    tmp_path: PathBuf,
    dest:     PathBuf,
    file:     Option<File>,
    keep:     bool,
}

impl Staging {
    pub fn create(dest: impl AsRef<Path>) -> Result<Self> {
        let dest = dest.as_ref().to_path_buf();
        let tmp_path = staging_path(&dest);
        // Never reuse a file we did not create; it may be someone's data.
        let file = match OpenOptions::new().write(true).create_new(true).open(&tmp_path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(Error::StagingExists(tmp_path));
            }
            Err(source) => {
                return Err(Error::Write {
                    path: tmp_path,
                    source,
                });
            }
        };

        Ok(Self {
            tmp_path,
            dest,
            file: Some(file),
            keep: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.tmp_path
    }

    pub fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        let Some(file) = self.file.as_mut() else {
            return Err(self.write_error(io::Error::other("staging file already closed")));
        };
        file.write_all(buf).map_err(|e| self.write_error(e))
    }

    /// Flush the staged bytes to disk and rename them onto the destination.
    pub fn publish(self) -> Result<()> {
        self.publish_with(|from, to| fs::rename(from, to))
    }

    fn publish_with(mut self, rename: impl Fn(&Path, &Path) -> io::Result<()>) -> Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()
                .and_then(|()| file.sync_all())
                .map_err(|e| self.write_error(e))?;
        }

        if let Err(first) = rename(&self.tmp_path, &self.dest) {
            // Some platforms refuse to rename over an existing file.
            if first.kind() == ErrorKind::NotFound || !self.dest.is_file() {
                return Err(self.publish_error(first));
            }
            debug!(dest = %self.dest.display(), "removing previous destination before publish");
            fs::remove_file(&self.dest).map_err(|e| self.publish_error(e))?;

            if let Err(e) = rename(&self.tmp_path, &self.dest) {
                self.keep = true;
                warn!(
                    staging = %self.tmp_path.display(),
                    dest = %self.dest.display(),
                    error = %e,
                    "publish failed after removing destination, keeping staged file"
                );
                return Err(self.publish_error(e));
            }
        }

        self.keep = true;
        Ok(())
    }

    fn write_error(&self, source: io::Error) -> Error {
        Error::Write {
            path: self.tmp_path.clone(),
            source,
        }
    }

    fn publish_error(&self, source: io::Error) -> Error {
        Error::Publish {
            from: self.tmp_path.clone(),
            to: self.dest.clone(),
            source,
        }
    }
}

impl Drop for Staging {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        drop(self.file.take());
        if let Err(e) = fs::remove_file(&self.tmp_path) {
            if e.kind() != ErrorKind::NotFound {
                warn!(path = %self.tmp_path.display(), error = %e, "failed to remove staging file");
            }
        }
    }
}
