use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::dir::UserDir;
use crate::error::{Error, Result};

const APP_DIR: &str = "kutti";
const CONFIG_DIR: &str = "kutti-config";
const CACHE_DIR: &str = "kutti-cache";

/// Root locations for configuration and cache files.
///
/// The default workspace lives under the OS user directories
/// (`<config>/kutti`, `<cache>/kutti`). A workspace created with
/// [`Workspace::at`] keeps both under one directory, as `kutti-config` and
/// `kutti-cache`.
///
/// Every resolver creates the directory it returns when it is absent, so
/// callers never have to prepare the tree themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workspace {
    root: Option<PathBuf>,
}

impl Workspace {
    /// Root the workspace at `path`, creating the directory if needed.
    pub fn at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        ensure_directory(path)?;
        debug!(root = %path.display(), "workspace set");
        Ok(Self {
            root: Some(path.to_path_buf()),
        })
    }

    /// The explicit root, or `None` for the OS default locations.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn is_default(&self) -> bool {
        self.root.is_none()
    }

    /// Directory holding configuration files. The directory is flat: config
    /// files live directly inside it.
    pub fn config_dir(&self) -> Result<PathBuf> {
        match &self.root {
            Some(root) => ensure_subdirectory(root, CONFIG_DIR),
            None => default_dir(UserDir::Config),
        }
    }

    pub fn config_subdir(&self, name: &str) -> Result<PathBuf> {
        let dir = self.config_dir()?;
        ensure_subdirectory(&dir, checked_subdir(name)?)
    }

    /// Directory holding cached data files.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        match &self.root {
            Some(root) => ensure_subdirectory(root, CACHE_DIR),
            None => default_dir(UserDir::Cache),
        }
    }

    pub fn cache_subdir(&self, name: &str) -> Result<PathBuf> {
        let dir = self.cache_dir()?;
        ensure_subdirectory(&dir, checked_subdir(name)?)
    }
}

fn default_dir(base: UserDir) -> Result<PathBuf> {
    let base = base.require()?;
    // The OS location itself may not exist yet on a fresh account.
    if !base.exists() {
        fs::create_dir_all(&base).map_err(|source| Error::CreateDir {
            path: base.clone(),
            source,
        })?;
    }
    ensure_subdirectory(&base, APP_DIR)
}

fn checked_subdir(name: &str) -> Result<&str> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(Error::InvalidSubdir(name.to_string()));
    }
    Ok(name)
}

fn ensure_subdirectory(dir: &Path, sub: &str) -> Result<PathBuf> {
    let path = dir.join(sub);
    ensure_directory(&path)?;
    Ok(path)
}

fn ensure_directory(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(Error::NotADirectory(path.to_path_buf())),
        Err(e) if e.kind() == ErrorKind::NotFound => match fs::create_dir(path) {
            Ok(()) => {
                debug!(path = %path.display(), "created directory");
                Ok(())
            }
            // Lost a race with another creator; fine as long as it is a directory.
            Err(e) if e.kind() == ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
            Err(source) => Err(Error::CreateDir {
                path: path.to_path_buf(),
                source,
            }),
        },
        Err(e) => Err(Error::Io(e)),
    }
}
