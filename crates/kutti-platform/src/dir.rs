//! OS-specific user directories.

use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Well-known per-user locations a workspace can be rooted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserDir {
    Home,
    Config,
    Cache,
    Data,
}

impl UserDir {
    pub fn name(self) -> &'static str {
        match self {
            UserDir::Home => "home",
            UserDir::Config => "config",
            UserDir::Cache => "cache",
            UserDir::Data => "data",
        }
    }

    pub fn locate(self) -> Option<PathBuf> {
        match self {
            UserDir::Home => user_home(),
            UserDir::Config => user_config(),
            UserDir::Cache => user_cache(),
            UserDir::Data => user_data(),
        }
    }

    /// Like [`UserDir::locate`], but an unknown location is an error.
    pub fn require(self) -> Result<PathBuf> {
        self.locate().ok_or(Error::NoUserDir(self.name()))
    }
}

pub fn user_home() -> Option<PathBuf> {
    home::home_dir()
}

/// - Windows: `APPDATA`
/// - macOS: `~/Library/Application Support`
/// - Linux: `$XDG_CONFIG_HOME` or `~/.config`
pub fn user_config() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var_os("APPDATA").map(PathBuf::from)
    }
    #[cfg(target_os = "macos")]
    {
        user_home().map(|p| p.join("Library/Application Support"))
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        xdg_or_home("XDG_CONFIG_HOME", ".config")
    }
}

/// - Windows: `LOCALAPPDATA`
/// - macOS: `~/Library/Caches`
/// - Linux: `$XDG_CACHE_HOME` or `~/.cache`
pub fn user_cache() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var_os("LOCALAPPDATA").map(PathBuf::from)
    }
    #[cfg(target_os = "macos")]
    {
        user_home().map(|p| p.join("Library/Caches"))
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        xdg_or_home("XDG_CACHE_HOME", ".cache")
    }
}

pub fn user_data() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var_os("LOCALAPPDATA").map(PathBuf::from)
    }
    #[cfg(target_os = "macos")]
    {
        user_home().map(|p| p.join("Library/Application Support"))
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        xdg_or_home("XDG_DATA_HOME", ".local/share")
    }
}

pub fn user_temp() -> PathBuf {
    env::temp_dir()
}

// XDG base directories must be absolute; relative values are ignored.
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn xdg_or_home(var: &str, fallback: &str) -> Option<PathBuf> {
    env::var_os(var)
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .or_else(|| user_home().map(|p| p.join(fallback)))
}
