use tracing::warn;

use crate::data::ConfigData;
use crate::error::{Error, Result};

/// Loads, saves and resets one [`ConfigData`] payload against some
/// persistent store.
pub trait ConfigManager {
    type Data: ConfigData;

    /// Load the stored state, or initialize and store defaults when nothing
    /// is stored yet.
    fn load(&mut self) -> Result<()>;

    fn save(&self) -> Result<()>;

    /// Reset the payload to defaults in memory. Nothing is persisted until
    /// the next [`ConfigManager::save`].
    fn reset(&mut self);

    fn data(&self) -> &Self::Data;

    fn data_mut(&mut self) -> &mut Self::Data;
}

/// Handle stored bytes that failed to decode: restore defaults, try to store
/// them, and hand back the decode error. A failing save is only logged.
pub(crate) fn recover<M: ConfigManager>(
    manager: &mut M,
    name: &str,
    source: <M::Data as ConfigData>::Error,
) -> Error {
    warn!(%name, error = %source, "stored config unreadable, restoring defaults");
    manager.reset();
    if let Err(e) = manager.save() {
        warn!(%name, error = %e, "failed to save default config");
    }
    Error::Decode {
        name:   name.to_string(),
        source: Box::new(source),
    }
}
