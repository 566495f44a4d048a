//! Network fetch capability
//!
//! Discovery, resolution and the pipeline driver never talk to the network
//! directly; they go through the [`Fetch`] trait. Production code uses
//! [`HttpFetcher`], tests inject a [`MemoryFetcher`] with canned bodies.

mod http;
mod memory;

pub use http::{build_http_client, HttpFetcher};
pub use memory::MemoryFetcher;

use crate::FetchError;
use async_trait::async_trait;

/// A single-attempt GET over an absolute location
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetches the raw body at `url`
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError>;

    /// Fetches the body at `url` as page text
    ///
    /// Bodies that are not valid UTF-8 are decoded lossily.
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let bytes = self.fetch_bytes(url).await?;
        match String::from_utf8(bytes) {
            Ok(text) => Ok(text),
            Err(e) => {
                tracing::warn!("Page {} is not valid UTF-8, decoding lossily", url);
                Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
            }
        }
    }
}
