use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Default)]
pub struct AtomicWriteOptions {
    pub permissions: Option<u32>,
    pub sync:        bool,
}

impl AtomicWriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn permissions(mut self, mode: u32) -> Self {
        self.permissions = Some(mode);
        self
    }

    pub fn sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }
}

/// Sibling path used while `path` is being replaced: `.<name>.tmp`.
pub(crate) fn sibling_tmp(path: &Path) -> PathBuf {
    let name = path.file_name().unwrap_or_default().to_string_lossy();
    path.with_file_name(format!(".{name}.tmp"))
}

/// Replace `path` with `content` in one step.
///
/// The bytes go to a sibling temporary file which is then renamed over
/// `path`; readers see either the old or the new content, never a mix.
pub fn atomic_write(path: impl AsRef<Path>, content: &[u8], options: AtomicWriteOptions) -> Result<()> {
    let path = path.as_ref();
    let tmp_path = sibling_tmp(path);

    let written = write_tmp(&tmp_path, content, options);
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    fs::rename(&tmp_path, path).map_err(|source| {
        let _ = fs::remove_file(&tmp_path);
        Error::Publish {
            from: tmp_path.clone(),
            to: path.to_path_buf(),
            source,
        }
    })
}

fn write_tmp(tmp_path: &Path, content: &[u8], options: AtomicWriteOptions) -> Result<()> {
    let write_err = |source| Error::Write {
        path: tmp_path.to_path_buf(),
        source,
    };

    fs::write(tmp_path, content).map_err(write_err)?;

    #[cfg(unix)]
    if let Some(mode) = options.permissions {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp_path, fs::Permissions::from_mode(mode)).map_err(write_err)?;
    }

    if options.sync {
        fs::File::open(tmp_path)
            .and_then(|f| f.sync_all())
            .map_err(write_err)?;
    }

    Ok(())
}

pub fn atomic_read(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.txt");
        atomic_write(&path, b"hello world", AtomicWriteOptions::new()).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"hello world");
        assert!(!sibling_tmp(&path).exists());
    }

    #[test]
    fn test_atomic_write_replaces_and_truncates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.txt");
        fs::write(&path, b"a much longer original payload").unwrap();
        atomic_write(&path, b"short", AtomicWriteOptions::new().sync(true)).unwrap();
        assert_eq!(atomic_read(&path).unwrap(), b"short");
    }

    #[cfg(unix)]
    #[test]
    fn test_atomic_write_with_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("test.txt");
        atomic_write(&path, b"data", AtomicWriteOptions::new().permissions(0o600)).unwrap();
        let metadata = fs::metadata(&path).unwrap();
        assert_eq!(metadata.permissions().mode() & 0o777, 0o600);
    }

    #[test]
    fn test_atomic_write_missing_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("test.txt");
        let err = atomic_write(&path, b"data", AtomicWriteOptions::new()).unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_atomic_write_onto_directory_fails_cleanly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("occupied");
        fs::create_dir(&path).unwrap();
        let err = atomic_write(&path, b"data", AtomicWriteOptions::new()).unwrap_err();
        assert!(matches!(err, Error::Publish { .. }));
        assert!(!sibling_tmp(&path).exists());
    }

    #[test]
    fn test_atomic_read_missing() {
        let dir = tempdir().unwrap();
        let err = atomic_read(dir.path().join("nope")).unwrap_err();
        assert_eq!(err.io_error().map(|e| e.kind()), Some(std::io::ErrorKind::NotFound));
    }
}
