//! Remote image source
//!
//! An [`ImageSource`] hands out URLs of randomly chosen, remotely hosted
//! images. Batches are all-or-nothing: either every request in the batch
//! succeeds, or the whole batch fails with the first [`NetworkError`].

pub mod error;
pub mod http_client;

use futures_util::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::num::NonZeroUsize;

pub use error::{ImageUrlError, NetworkError};
pub use http_client::WaifuClient;

/// Opaque reference to a remotely hosted image.
///
/// The only validation is that the string is not blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageUrl(String);

impl ImageUrl {
    pub fn new(url: impl Into<String>) -> Result<Self, ImageUrlError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(ImageUrlError::Empty);
        }
        Ok(Self(url))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment, used as a short caption in list views
    pub fn file_name(&self) -> &str {
        let path = self.0.split(['?', '#']).next().unwrap_or(self.0.as_str());
        path.trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or(self.0.as_str())
    }
}

impl TryFrom<String> for ImageUrl {
    type Error = ImageUrlError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ImageUrl> for String {
    fn from(url: ImageUrl) -> Self {
        url.0
    }
}

impl fmt::Display for ImageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Something that can produce random image URLs.
///
/// Implementors only need [`fetch_one`](ImageSource::fetch_one); the default
/// [`fetch_batch`](ImageSource::fetch_batch) issues the requests concurrently
/// and joins them.
pub trait ImageSource: Send + Sync + 'static {
    /// Fetch a single image URL
    fn fetch_one(&self) -> impl Future<Output = Result<ImageUrl, NetworkError>> + Send;

    /// Fetch `n` image URLs concurrently.
    ///
    /// Returns exactly `n` URLs in request order, or the first error.
    fn fetch_batch(
        &self,
        n: NonZeroUsize,
    ) -> impl Future<Output = Result<Vec<ImageUrl>, NetworkError>> + Send {
        async move {
            tracing::trace!("Issuing batch of {} image requests", n);
            let requests = (0..n.get()).map(|_| self.fetch_one());
            try_join_all(requests).await
        }
    }
}
