use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use kutti_fs::{AtomicWriteOptions, atomic_write};
use kutti_platform::Workspace;
use tracing::{debug, trace};

use crate::data::ConfigData;
use crate::error::{Error, Result};
use crate::manager::{ConfigManager, recover};

/// Keeps a payload in a single file directly inside the workspace's config
/// directory.
#[derive(Debug)]
pub struct FileConfigManager<D> {
    workspace: Workspace,
    name:      String,
    data:      D,
}

impl<D: ConfigData> FileConfigManager<D> {
    /// Bind `data` to the config file `name` and load it.
    ///
    /// `name` must be a bare file name. A missing file is created with the
    /// payload's defaults; any other load failure is returned instead of a
    /// manager.
    pub fn new(workspace: &Workspace, name: impl Into<String>, data: D) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;

        let mut manager = Self {
            workspace: workspace.clone(),
            name,
            data,
        };
        manager.load()?;
        Ok(manager)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Full path of the backing file. Creates the config directory if it is
    /// missing.
    pub fn path(&self) -> Result<PathBuf> {
        Ok(self.workspace.config_dir()?.join(&self.name))
    }

    pub fn into_inner(self) -> D {
        self.data
    }
}

impl<D: ConfigData> ConfigManager for FileConfigManager<D> {
    type Data = D;

    fn load(&mut self) -> Result<()> {
        let path = self.path()?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(name = %self.name, "config file does not exist, loading defaults");
                self.data.set_defaults();
                return self.save();
            }
            Err(source) => return Err(Error::Read { path, source }),
        };

        if let Err(e) = self.data.deserialize(&bytes) {
            let name = self.name.clone();
            return Err(recover(self, &name, e));
        }

        trace!(name = %self.name, data = %String::from_utf8_lossy(&bytes), "config file loaded");
        Ok(())
    }

    fn save(&self) -> Result<()> {
        debug!(name = %self.name, "saving config file");
        let bytes = self.data.serialize().map_err(|e| Error::Encode {
            name:   self.name.clone(),
            source: Box::new(e),
        })?;

        let path = self.path()?;
        atomic_write(&path, &bytes, AtomicWriteOptions::new())
            .map_err(|source| Error::Write { path, source })
    }

    fn reset(&mut self) {
        self.data.set_defaults();
    }

    fn data(&self) -> &D {
        &self.data
    }

    fn data_mut(&mut self) -> &mut D {
        &mut self.data
    }
}

/// Config files live directly in the config directory, never below it.
pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::EmptyName);
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(Error::NotBareName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("kutti.json").is_ok());
        assert!(validate_name(".hidden").is_ok());
        assert!(matches!(validate_name(""), Err(Error::EmptyName)));
        for bad in [".", "..", "a/b.json", "../escape.json", "dir\\file.json", "/abs.json"] {
            assert!(
                matches!(validate_name(bad), Err(Error::NotBareName(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
