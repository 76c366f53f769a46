use std::io::Read;

/// Response head plus a streaming body.
pub struct HttpResponse {
    pub status:         u16,
    /// Declared `Content-Length`, absent for chunked responses.
    pub content_length: Option<u64>,
    pub body:           Box<dyn Read + Send>,
}

impl std::fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// Blocking HTTP GET.
///
/// Implementations follow redirects the way their transport does by default
/// and report transport failures through `Self::Error`. A non-success status
/// is not an error at this layer; it is returned in [`HttpResponse::status`].
pub trait HttpClient {
    type Error: std::error::Error + Send + Sync + 'static;

    fn get(&self, url: &str) -> std::result::Result<HttpResponse, Self::Error>;
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    type Error = C::Error;

    fn get(&self, url: &str) -> std::result::Result<HttpResponse, Self::Error> {
        (**self).get(url)
    }
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;
    use reqwest::blocking::Client;

    /// Production client backed by `reqwest`'s blocking API.
    #[derive(Clone, Debug)]
    pub struct ReqwestClient {
        client: Client,
    }

    impl ReqwestClient {
        pub fn new() -> Result<Self, reqwest::Error> {
            let client = Client::builder().build()?;
            Ok(Self { client })
        }

        /// Use a preconfigured client (proxies, timeouts, headers).
        pub fn with_client(client: Client) -> Self {
            Self { client }
        }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        fn get(&self, url: &str) -> Result<HttpResponse, Self::Error> {
            let response = self.client.get(url).send()?;
            Ok(HttpResponse {
                status:         response.status().as_u16(),
                content_length: response.content_length(),
                body:           Box::new(response),
            })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;
