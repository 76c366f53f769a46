//! HTTP downloads with progress reporting and atomic placement.
//!
//! The body of a `GET` response is streamed through
//! [`kutti_fs::transfer`], so the destination is replaced only after the
//! whole body has arrived. Only status 200 counts as success; there are no
//! retries.
//!
//! The transport sits behind [`HttpClient`]. [`ReqwestClient`] is the
//! default implementation; tests and hosts can supply their own.

mod downloader;
mod error;
mod http;

pub use downloader::Downloader;
pub use error::{BoxError, Error, Result};
pub use http::{HttpClient, HttpResponse};
pub use kutti_fs::{Progress, TransferOptions};

#[cfg(feature = "reqwest")]
pub use downloader::{download_file, download_file_with_progress};
#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
