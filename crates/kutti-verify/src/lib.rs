//! Content checksums for kutti.
//!
//! Hashing happens as bytes stream through a [`VerifiedReader`], so a file
//! is read once regardless of its size.
//!
//! # Example
//!
//! ```
//! use kutti_verify::checksum_reader;
//!
//! let sum = checksum_reader(&b"abc"[..]).unwrap();
//! assert_eq!(sum, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
//! ```

pub use self::checksum::{checksum_file, checksum_reader, verify_file};
pub use self::error::{Result, VerifyError};
pub use self::hasher::{Hasher, Sha256Hasher};
pub use self::reader::VerifiedReader;

mod checksum;
mod error;
mod hasher;
mod reader;
