//! Image data loader and cache over a [`FeedImageDataStore`].

use std::sync::Arc;

use bytes::Bytes;
use url::Url;

use super::store::FeedImageDataStore;
use crate::Error;
use crate::feed::{FeedImageDataCache, FeedImageDataLoader};

#[derive(Debug)]
pub struct LocalFeedImageDataLoader<S: ?Sized> {
    store: Arc<S>,
}

impl<S: FeedImageDataStore + ?Sized> LocalFeedImageDataLoader<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl<S: FeedImageDataStore + ?Sized> FeedImageDataLoader for LocalFeedImageDataLoader<S> {
    async fn load_image_data(&self, url: &Url) -> Result<Bytes, Error> {
        self.store.retrieve_image_data(url).await?.ok_or_else(|| Error::ImageDataNotFound(url.to_string()))
    }
}

#[async_trait::async_trait]
impl<S: FeedImageDataStore + ?Sized> FeedImageDataCache for LocalFeedImageDataLoader<S> {
    async fn save_image_data(&self, data: &[u8], url: &Url) -> Result<(), Error> {
        self.store.insert_image_data(data, url).await?;
        tracing::debug!(%url, bytes = data.len(), "saved image data to cache");
        Ok(())
    }
}
