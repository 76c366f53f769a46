use std::io::{self, Read};

use crate::Hasher;

/// Reader adapter that hashes every byte it hands out.
pub struct VerifiedReader<R, H> {
    reader: R,
    hasher: H,
}

impl<R, H> VerifiedReader<R, H> {
    pub fn new(reader: R, hasher: H) -> Self {
        Self { reader, hasher }
    }
}

impl<R: Read, H: Hasher> VerifiedReader<R, H> {
    /// Digest of everything read so far.
    pub fn finish(self) -> Vec<u8> {
        self.hasher.finalize()
    }
}

impl<R: Read, H: Hasher> Read for VerifiedReader<R, H> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.reader.read(buf)?;
        if n > 0 {
            self.hasher.update(&buf[..n]);
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sha256Hasher;
    use std::io::Cursor;

    #[test]
    fn test_sha256_hasher() {
        let mut hasher = Sha256Hasher::new();
        hasher.update(b"hello ");
        hasher.update(b"world");
        let expected =
            hex::decode("b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9")
                .unwrap();
        assert_eq!(hasher.finalize(), expected);
    }

    #[test]
    fn test_verified_reader_passes_bytes_through() {
        let data = b"test data for verification";
        let mut reader = VerifiedReader::new(Cursor::new(data), Sha256Hasher::new());
        let mut out = Vec::new();
        io::copy(&mut reader, &mut out).unwrap();

        assert_eq!(out, data);
        assert_eq!(reader.finish(), Sha256Hasher::digest(data));
    }

    #[test]
    fn test_verified_reader_partial_read() {
        let mut reader = VerifiedReader::new(&b"abcdef"[..], Sha256Hasher::new());
        let mut buf = [0u8; 3];
        reader.read_exact(&mut buf).unwrap();
        assert_eq!(reader.finish(), Sha256Hasher::digest(b"abc"));
    }
}
