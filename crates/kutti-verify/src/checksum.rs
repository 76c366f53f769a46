use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::{Result, Sha256Hasher, VerifiedReader, VerifyError};

/// Lowercase hex SHA-256 of everything `reader` yields.
pub fn checksum_reader(reader: impl Read) -> Result<String> {
    let mut reader = VerifiedReader::new(reader, Sha256Hasher::new());
    io::copy(&mut reader, &mut io::sink())?;
    Ok(hex::encode(reader.finish()))
}

/// Lowercase hex SHA-256 of the file at `path`.
pub fn checksum_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let read_err = |source| VerifyError::Read {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(read_err)?;
    let mut reader = VerifiedReader::new(file, Sha256Hasher::new());
    io::copy(&mut reader, &mut io::sink()).map_err(read_err)?;
    Ok(hex::encode(reader.finish()))
}

/// Compare the file's SHA-256 against `expected` (hex, case-insensitive).
pub fn verify_file(path: impl AsRef<Path>, expected: &str) -> Result<()> {
    if hex::decode(expected).map_or(true, |d| d.len() != 32) {
        return Err(VerifyError::InvalidDigest(expected.to_string()));
    }
    let actual = checksum_file(path)?;
    if actual.eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(VerifyError::Mismatch {
            expected: expected.to_ascii_lowercase(),
            actual,
        })
    }
}
