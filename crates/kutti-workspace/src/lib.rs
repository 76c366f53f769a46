//! kutti workspace support: configuration files kept under an explicit
//! [`Workspace`], and checksummed copies and downloads that never leave a
//! half-written destination behind.
//!
//! This crate only re-exports the member crates. Each is usable on its own:
//!
//! - [`platform`]: user directories, workspace roots, process execution
//! - [`fs`]: atomic writes and the staged, progress-reporting transfer
//! - [`verify`]: SHA-256 checksums
//! - [`fetch`]: HTTP downloads over the staged transfer
//! - [`config`]: `ConfigData` payloads and their managers
//!
//! ```no_run
//! use kutti_workspace::{ConfigManager, FileConfigManager, Json, Workspace};
//! use std::collections::BTreeMap;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let workspace = Workspace::default();
//! let mut images = FileConfigManager::new(
//!     &workspace,
//!     "images.json",
//!     Json(BTreeMap::<String, String>::new()),
//! )?;
//!
//! let dest = workspace.cache_subdir("images")?.join("k8s-1.30.qcow2");
//! kutti_workspace::download_file("https://example.com/k8s-1.30.qcow2", &dest)?;
//! let sum = kutti_workspace::checksum_file(&dest)?;
//!
//! images.data_mut().insert("k8s-1.30".into(), sum);
//! images.save()?;
//! # Ok(())
//! # }
//! ```

pub use kutti_config as config;
pub use kutti_fetch as fetch;
pub use kutti_fs as fs;
pub use kutti_platform as platform;
pub use kutti_verify as verify;

#[cfg(feature = "json")]
pub use kutti_config::Json;
#[cfg(feature = "toml")]
pub use kutti_config::Toml;
pub use kutti_config::{ConfigData, ConfigManager, FileConfigManager, MemoryConfigManager};
#[cfg(feature = "reqwest")]
pub use kutti_fetch::{ReqwestClient, download_file, download_file_with_progress};
pub use kutti_fetch::{Downloader, HttpClient, HttpResponse};
pub use kutti_fs::{
    Progress, TransferOptions, atomic_read, atomic_write, copy_file, copy_file_with_progress,
    remove_file,
};
pub use kutti_platform::Workspace;
pub use kutti_platform::command::run_with_results;
pub use kutti_verify::checksum_file;
