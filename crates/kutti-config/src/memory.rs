use std::cell::RefCell;

use tracing::debug;

use crate::data::ConfigData;
use crate::error::{Error, Result};
use crate::manager::{ConfigManager, recover};

/// Keeps the serialized payload in memory. Follows the same load and save
/// rules as [`FileConfigManager`](crate::FileConfigManager) without touching
/// disk, which makes it a drop-in for tests.
#[derive(Debug)]
pub struct MemoryConfigManager<D> {
    name:   String,
    stored: RefCell<Option<Vec<u8>>>,
    data:   D,
}

impl<D: ConfigData> MemoryConfigManager<D> {
    /// Start with an empty store, which [`ConfigManager::load`] treats like a
    /// missing file.
    pub fn new(name: impl Into<String>, data: D) -> Result<Self> {
        Self::build(name.into(), None, data)
    }

    /// Start from previously stored bytes.
    pub fn with_bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>, data: D) -> Result<Self> {
        Self::build(name.into(), Some(bytes.into()), data)
    }

    fn build(name: String, stored: Option<Vec<u8>>, data: D) -> Result<Self> {
        crate::file::validate_name(&name)?;
        let mut manager = Self {
            name,
            stored: RefCell::new(stored),
            data,
        };
        manager.load()?;
        Ok(manager)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bytes as of the last save, if any.
    pub fn stored(&self) -> Option<Vec<u8>> {
        self.stored.borrow().clone()
    }

    pub fn into_inner(self) -> D {
        self.data
    }
}

impl<D: ConfigData> ConfigManager for MemoryConfigManager<D> {
    type Data = D;

    fn load(&mut self) -> Result<()> {
        let stored = self.stored.borrow().clone();
        let Some(bytes) = stored else {
            debug!(name = %self.name, "no stored config, loading defaults");
            self.data.set_defaults();
            return self.save();
        };

        if let Err(source) = self.data.deserialize(&bytes) {
            let name = self.name.clone();
            return Err(recover(self, &name, source));
        }
        Ok(())
    }

    fn save(&self) -> Result<()> {
        let bytes = self.data.serialize().map_err(|e| Error::Encode {
            name:   self.name.clone(),
            source: Box::new(e),
        })?;
        *self.stored.borrow_mut() = Some(bytes);
        Ok(())
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
