//! Named configuration payloads persisted in a kutti workspace.
//!
//! A [`ConfigData`] knows how to turn itself into bytes and back and what its
//! defaults are. A [`ConfigManager`] binds one to a store: loading falls back
//! to defaults when nothing is stored, and resets and re-saves defaults when
//! the stored bytes cannot be decoded.
//!
//! ```no_run
//! use kutti_config::{ConfigManager, FileConfigManager, Json};
//! use kutti_platform::Workspace;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Default, Serialize, Deserialize)]
//! struct Cluster {
//!     name:  String,
//!     nodes: u32,
//! }
//!
//! # fn main() -> kutti_config::Result<()> {
//! let workspace = Workspace::default();
//! let mut config = FileConfigManager::new(&workspace, "cluster.json", Json(Cluster::default()))?;
//! config.data_mut().nodes += 1;
//! config.save()?;
//! # Ok(())
//! # }
//! ```

mod data;
mod error;
mod file;
mod manager;
mod memory;

pub use data::ConfigData;
#[cfg(feature = "json")]
pub use data::Json;
#[cfg(feature = "toml")]
pub use data::{Toml, TomlError};
pub use error::{BoxError, Error, Result};
pub use file::FileConfigManager;
pub use manager::ConfigManager;
pub use memory::MemoryConfigManager;
