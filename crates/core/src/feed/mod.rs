//! Feed domain model and the capabilities that loaders and caches expose.
//!
//! Every capability is object-safe and implemented for `Arc<T>`, so a shared
//! handle can stand in anywhere the capability is expected. Composites in
//! [`crate::compose`] are built purely on these traits.

mod task;

pub use task::{LoaderTask, load_image_data_task};

use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use url::Url;
use uuid::Uuid;

use crate::Error;

/// A single image post in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedItem {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    /// Location of the image associated with this item.
    pub url: Url,
}

impl FeedItem {
    pub fn new(id: Uuid, description: Option<String>, location: Option<String>, url: Url) -> Self {
        Self { id, description, location, url }
    }
}

/// Anything that can produce a feed.
#[async_trait::async_trait]
pub trait FeedLoader: Send + Sync {
    async fn load(&self) -> Result<Vec<FeedItem>, Error>;
}

/// A sink that persists a loaded feed.
#[async_trait::async_trait]
pub trait FeedCache: Send + Sync {
    async fn save(&self, feed: &[FeedItem]) -> Result<(), Error>;
}

/// Anything that can produce the raw bytes of a feed image.
#[async_trait::async_trait]
pub trait FeedImageDataLoader: Send + Sync {
    async fn load_image_data(&self, url: &Url) -> Result<Bytes, Error>;
}

/// A sink that persists image bytes for a URL.
#[async_trait::async_trait]
pub trait FeedImageDataCache: Send + Sync {
    async fn save_image_data(&self, data: &[u8], url: &Url) -> Result<(), Error>;
}

#[async_trait::async_trait]
impl<T: FeedLoader + ?Sized> FeedLoader for Arc<T> {
    async fn load(&self) -> Result<Vec<FeedItem>, Error> {
        (**self).load().await
    }
}

#[async_trait::async_trait]
impl<T: FeedCache + ?Sized> FeedCache for Arc<T> {
    async fn save(&self, feed: &[FeedItem]) -> Result<(), Error> {
        (**self).save(feed).await
    }
}

#[async_trait::async_trait]
impl<T: FeedImageDataLoader + ?Sized> FeedImageDataLoader for Arc<T> {
    async fn load_image_data(&self, url: &Url) -> Result<Bytes, Error> {
        (**self).load_image_data(url).await
    }
}

#[async_trait::async_trait]
impl<T: FeedImageDataCache + ?Sized> FeedImageDataCache for Arc<T> {
    async fn save_image_data(&self, data: &[u8], url: &Url) -> Result<(), Error> {
        (**self).save_image_data(data, url).await
    }
}
