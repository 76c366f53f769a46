pub mod atomic_write;
pub mod remove;

pub use atomic_write::{AtomicWriteOptions, atomic_read, atomic_write};
pub use remove::remove_file;
