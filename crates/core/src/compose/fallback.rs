//! Primary-then-fallback loader.

use bytes::Bytes;
use url::Url;

use crate::Error;
use crate::feed::{FeedImageDataLoader, FeedItem, FeedLoader};

/// Tries `primary`; on failure tries `fallback` once and returns its outcome.
///
/// The load future owns whichever inner load is running, so dropping or
/// aborting it cancels the primary before the switch and the fallback after.
#[derive(Debug, Clone)]
pub struct FallbackComposite<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackComposite<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait::async_trait]
impl<P: FeedLoader, F: FeedLoader> FeedLoader for FallbackComposite<P, F> {
    async fn load(&self) -> Result<Vec<FeedItem>, Error> {
        match self.primary.load().await {
            Ok(feed) => Ok(feed),
            Err(e) => {
                tracing::debug!(error = %e, "primary feed loader failed, trying fallback");
                self.fallback.load().await
            }
        }
    }
}

#[async_trait::async_trait]
impl<P: FeedImageDataLoader, F: FeedImageDataLoader> FeedImageDataLoader for FallbackComposite<P, F> {
    async fn load_image_data(&self, url: &Url) -> Result<Bytes, Error> {
        match self.primary.load_image_data(url).await {
            Ok(data) => Ok(data),
            Err(e) => {
                tracing::debug!(%url, error = %e, "primary image data loader failed, trying fallback");
                self.fallback.load_image_data(url).await
            }
        }
    }
}
