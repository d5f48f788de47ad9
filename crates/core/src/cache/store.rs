//! Persistence contract for the feed cache.
//!
//! The store holds at most one snapshot. Implementations must run mutating
//! calls and reads serially, in the order they were issued, so a reader never
//! sees a half-written snapshot.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use url::Url;
use uuid::Uuid;

use crate::Error;
use crate::feed::FeedItem;

/// Store-side mirror of [`FeedItem`].
///
/// Kept as its own type so the store schema and the domain model can change
/// independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFeedItem {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Url,
}

impl From<&FeedItem> for LocalFeedItem {
    fn from(item: &FeedItem) -> Self {
        Self {
            id: item.id,
            description: item.description.clone(),
            location: item.location.clone(),
            url: item.url.clone(),
        }
    }
}

impl From<LocalFeedItem> for FeedItem {
    fn from(local: LocalFeedItem) -> Self {
        FeedItem { id: local.id, description: local.description, location: local.location, url: local.url }
    }
}

/// The whole cache content: an ordered feed and when it was captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedFeed {
    pub feed: Vec<LocalFeedItem>,
    pub timestamp: DateTime<Utc>,
}

/// Persistence for the single cached feed snapshot.
#[async_trait::async_trait]
pub trait FeedStore: Send + Sync {
    /// Remove the snapshot. Succeeds when nothing is stored.
    async fn delete_cached_feed(&self) -> Result<(), Error>;

    /// Store a new snapshot, replacing any previous one.
    async fn insert(&self, feed: Vec<LocalFeedItem>, timestamp: DateTime<Utc>) -> Result<(), Error>;

    /// Read the snapshot without modifying the store.
    async fn retrieve(&self) -> Result<Option<CachedFeed>, Error>;
}

/// Persistence for image bytes keyed by image URL.
#[async_trait::async_trait]
pub trait FeedImageDataStore: Send + Sync {
    async fn insert_image_data(&self, data: &[u8], url: &Url) -> Result<(), Error>;

    async fn retrieve_image_data(&self, url: &Url) -> Result<Option<Bytes>, Error>;
}

pub(crate) fn to_local(feed: &[FeedItem]) -> Vec<LocalFeedItem> {
    feed.iter().map(LocalFeedItem::from).collect()
}

pub(crate) fn to_models(feed: Vec<LocalFeedItem>) -> Vec<FeedItem> {
    feed.into_iter().map(FeedItem::from).collect()
}
