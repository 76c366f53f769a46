use std::path::Path;

use kutti_fs::{Progress, ProgressFn, TransferOptions, check_destination, transfer};
use tracing::debug;

use crate::error::{Error, Result};
use crate::http::HttpClient;

const HTTP_OK: u16 = 200;

/// Downloads a URL to a file through the staged transfer, so the destination
/// only ever holds a complete download.
pub struct Downloader<C: HttpClient> {
    client:  C,
    options: TransferOptions,
}

impl<C: HttpClient> Downloader<C> {
    /// Downloads replace an existing destination by default.
    pub fn new(client: C) -> Self {
        Self {
            client,
            options: TransferOptions::new().overwrite(true),
        }
    }

    pub fn options(mut self, options: TransferOptions) -> Self {
        self.options = options;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Fetch `url` into `dest`, returning the number of bytes written.
    ///
    /// Destination preconditions are checked before the request is sent. Any
    /// status other than 200 fails without touching `dest`.
    pub fn download(
        &self,
        url: &str,
        dest: impl AsRef<Path>,
        on_progress: Option<ProgressFn<'_>>,
    ) -> Result<u64> {
        let dest = dest.as_ref();
        if self.options.get_chunk_size() == 0 {
            return Err(kutti_fs::Error::InvalidChunkSize.into());
        }
        check_destination(dest, self.options.get_overwrite())?;

        debug!(%url, "connecting");
        let response = self.client.get(url).map_err(|e| Error::Request {
            url:    url.to_string(),
            source: Box::new(e),
        })?;

        if response.status != HTTP_OK {
            return Err(Error::Status {
                url:    url.to_string(),
                status: response.status,
            });
        }

        debug!(%url, dest = %dest.display(), total = ?response.content_length, "downloading");
        let bytes = transfer(
            response.body,
            dest,
            response.content_length,
            &self.options,
            on_progress,
        )?;
        debug!(%url, dest = %dest.display(), bytes, "downloaded");
        Ok(bytes)
    }

    pub fn download_with_progress(
        &self,
        url: &str,
        dest: impl AsRef<Path>,
        mut on_progress: impl FnMut(&Progress),
    ) -> Result<u64> {
        self.download(url, dest, Some(&mut on_progress))
    }
}

#[cfg(feature = "reqwest")]
fn default_downloader() -> Result<Downloader<crate::ReqwestClient>> {
    let client = crate::ReqwestClient::new().map_err(|e| Error::Client(Box::new(e)))?;
    Ok(Downloader::new(client))
}

/// Download `url` to `dest`, replacing any existing file.
#[cfg(feature = "reqwest")]
pub fn download_file(url: &str, dest: impl AsRef<Path>) -> Result<u64> {
    default_downloader()?.download(url, dest, None)
}

/// [`download_file`] reporting `(downloaded, content length)` after every
/// chunk. The total is `None` when the server does not declare a length.
#[cfg(feature = "reqwest")]
pub fn download_file_with_progress(
    url: &str,
    dest: impl AsRef<Path>,
    on_progress: impl FnMut(&Progress),
) -> Result<u64> {
    default_downloader()?.download_with_progress(url, dest, on_progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;
    use std::cell::Cell;
    use std::io;
    use tempfile::tempdir;

    struct StaticClient {
        status: u16,
        body:   &'static [u8],
        length: Option<u64>,
        calls:  Cell<usize>,
    }

    impl StaticClient {
        fn new(status: u16, body: &'static [u8]) -> Self {
            Self {
                status,
                body,
                length: Some(body.len() as u64),
                calls: Cell::new(0),
            }
        }
    }

    impl HttpClient for StaticClient {
        type Error = io::Error;

        fn get(&self, _url: &str) -> std::result::Result<HttpResponse, io::Error> {
            self.calls.set(self.calls.get() + 1);
            Ok(HttpResponse {
                status:         self.status,
                content_length: self.length,
                body:           Box::new(self.body),
            })
        }
    }

    struct Unreachable;

    impl HttpClient for Unreachable {
        type Error = io::Error;

        fn get(&self, _url: &str) -> std::result::Result<HttpResponse, io::Error> {
            Err(io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"))
        }
    }

    #[test]
    fn test_download_writes_body() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("file.txt");
        let downloader = Downloader::new(StaticClient::new(200, b"hello world"));

        let n = downloader.download("http://example.test/file.txt", &dest, None).unwrap();

        assert_eq!(n, 11);
        assert_eq!(std::fs::read(&dest).unwrap(), b"hello world");
    }

    #[test]
    fn test_download_non_200_leaves_destination() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("file.txt");
        std::fs::write(&dest, b"previous").unwrap();

        for status in [201, 204, 301, 404, 500] {
            let downloader = Downloader::new(StaticClient::new(status, b"error page"));
            let err = downloader.download("http://example.test/x", &dest, None).unwrap_err();
            assert!(matches!(err, Error::Status { status: s, .. } if s == status));
            assert_eq!(std::fs::read(&dest).unwrap(), b"previous");
            assert!(!kutti_fs::transfer::staging_path(&dest).exists());
        }
    }

    #[test]
    fn test_download_without_overwrite_skips_request() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("file.txt");
        std::fs::write(&dest, b"keep").unwrap();

        let downloader = Downloader::new(StaticClient::new(200, b"new"))
            .options(TransferOptions::new().overwrite(false));
        let err = downloader.download("http://example.test/x", &dest, None).unwrap_err();

        assert!(matches!(err, Error::Transfer(kutti_fs::Error::DestinationExists(_))));
        assert_eq!(downloader.client().calls.get(), 0);
        assert_eq!(std::fs::read(&dest).unwrap(), b"keep");
    }

    #[test]
    fn test_download_transport_error() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("file.txt");
        let err = Downloader::new(Unreachable)
            .download("http://example.test/x", &dest, None)
            .unwrap_err();
        assert!(matches!(err, Error::Request { .. }));
        assert!(!dest.exists());
    }

    #[test]
    fn test_download_progress_unknown_total() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("chunked.bin");
        let mut client = StaticClient::new(200, b"0123456789");
        client.length = None;

        let mut reports = Vec::new();
        Downloader::new(client)
            .options(TransferOptions::new().chunk_size(4).overwrite(true))
            .download_with_progress("http://example.test/chunked", &dest, |p| reports.push(*p))
            .unwrap();

        let counts: Vec<u64> = reports.iter().map(|p| p.transferred).collect();
        assert_eq!(counts, vec![4, 8, 10]);
        assert!(reports.iter().all(|p| p.total.is_none()));
    }
}
