//! Loader that writes what it loaded into a cache.

use bytes::Bytes;
use url::Url;

use crate::Error;
use crate::feed::{FeedCache, FeedImageDataCache, FeedImageDataLoader, FeedItem, FeedLoader};

/// Forwards the decoratee's result and, on success, saves it to `cache`.
///
/// The save is awaited before returning but its outcome never changes the
/// result; failures are only logged.
#[derive(Debug, Clone)]
pub struct CacheDecorator<L, C> {
    decoratee: L,
    cache: C,
}

impl<L, C> CacheDecorator<L, C> {
    pub fn new(decoratee: L, cache: C) -> Self {
        Self { decoratee, cache }
    }
}

#[async_trait::async_trait]
impl<L: FeedLoader, C: FeedCache> FeedLoader for CacheDecorator<L, C> {
    async fn load(&self) -> Result<Vec<FeedItem>, Error> {
        let feed = self.decoratee.load().await?;
        if let Err(e) = self.cache.save(&feed).await {
            tracing::warn!(error = %e, "failed to cache loaded feed");
        }
        Ok(feed)
    }
}

#[async_trait::async_trait]
impl<L: FeedImageDataLoader, C: FeedImageDataCache> FeedImageDataLoader for CacheDecorator<L, C> {
    async fn load_image_data(&self, url: &Url) -> Result<Bytes, Error> {
        let data = self.decoratee.load_image_data(url).await?;
        if let Err(e) = self.cache.save_image_data(&data, url).await {
            tracing::warn!(%url, error = %e, "failed to cache loaded image data");
        }
        Ok(data)
    }
}
