//! Platform helpers for kutti: OS user directories, workspace root
//! resolution and process execution.
//!
//! A [`Workspace`] is an explicit value describing where configuration and
//! cache files live. It is created once by the host and passed to every
//! consumer that needs a root directory.

pub use error::{Error, Result};
pub use workspace::Workspace;

pub mod command;
pub mod dir;
mod error;
mod workspace;
