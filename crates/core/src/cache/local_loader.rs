//! Feed loader and cache over a [`FeedStore`].
//!
//! `save` replaces the snapshot (delete, then insert stamped with the injected
//! clock), `load` serves the snapshot only while [`policy::validate`] accepts
//! it and never writes, and `validate_cache` purges unreadable or expired
//! snapshots.
//!
//! Snapshots are stamped as UTC instants. Expiry is judged on the loader's
//! calendar, which defaults to the system's local time zone, so a week that
//! spans a DST change ends at the same local wall-clock time.
//!
//! Releasing the loader mid-operation means dropping the operation's future,
//! which discards the continuation: no result is produced and no further
//! store call is issued.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use tokio::task::JoinHandle;

use super::policy;
use super::store::{CachedFeed, FeedStore, to_local, to_models};
use crate::Error;
use crate::feed::{FeedCache, FeedItem, FeedLoader};

/// Source of "now" for stamping and expiry checks.
pub type CurrentDate = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub struct LocalFeedLoader<S: ?Sized, Tz = Local> {
    store: Arc<S>,
    current_date: CurrentDate,
    calendar: Tz,
}

impl<S: ?Sized, Tz> fmt::Debug for LocalFeedLoader<S, Tz> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalFeedLoader").finish_non_exhaustive()
    }
}

impl<S: FeedStore + ?Sized> LocalFeedLoader<S> {
    /// Loader judging expiry in the system's local time zone.
    pub fn new(store: Arc<S>, current_date: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        Self::with_calendar(store, current_date, Local)
    }
}

impl<S: FeedStore + ?Sized, Tz: TimeZone + Send + Sync> LocalFeedLoader<S, Tz> {
    pub fn with_calendar(
        store: Arc<S>,
        current_date: impl Fn() -> DateTime<Utc> + Send + Sync + 'static,
        calendar: Tz,
    ) -> Self {
        Self { store, current_date: Arc::new(current_date), calendar }
    }

    fn is_fresh(&self, timestamp: &DateTime<Utc>) -> bool {
        let now = (self.current_date)();
        policy::validate(&timestamp.with_timezone(&self.calendar), &now.with_timezone(&self.calendar))
    }

    /// Replace the cached snapshot with `feed`.
    ///
    /// # Errors
    ///
    /// Returns the deletion error without attempting the insert, or the
    /// insertion error.
    pub async fn save(&self, feed: &[FeedItem]) -> Result<(), Error> {
        self.store.delete_cached_feed().await?;
        self.store.insert(to_local(feed), (self.current_date)()).await?;

        tracing::debug!(items = feed.len(), "saved feed to cache");
        Ok(())
    }

    /// Cached items if the snapshot is still fresh, otherwise an empty feed.
    ///
    /// # Errors
    ///
    /// Returns the store's retrieval error unchanged.
    pub async fn load(&self) -> Result<Vec<FeedItem>, Error> {
        match self.store.retrieve().await? {
            Some(CachedFeed { feed, timestamp }) if self.is_fresh(&timestamp) => {
                Ok(to_models(feed))
            }
            Some(_) => {
                tracing::debug!("cached feed expired");
                Ok(Vec::new())
            }
            None => Ok(Vec::new()),
        }
    }

    /// Purge the snapshot when it cannot be read or has expired.
    pub async fn validate_cache(&self) {
        let retrieved = self.store.retrieve().await;
        self.purge_if_invalid(retrieved).await;
    }

    async fn purge_if_invalid(&self, retrieved: Result<Option<CachedFeed>, Error>) {
        let reason = match retrieved {
            Err(e) => e.to_string(),
            Ok(Some(cache)) if !self.is_fresh(&cache.timestamp) => "expired".to_string(),
            Ok(_) => return,
        };

        tracing::debug!(%reason, "purging feed cache");
        if let Err(e) = self.store.delete_cached_feed().await {
            tracing::warn!(error = %e, "failed to purge feed cache");
        }
    }
}

impl<S: FeedStore + ?Sized + 'static, Tz: TimeZone + Send + Sync + 'static> LocalFeedLoader<S, Tz> {
    /// Run [`validate_cache`](Self::validate_cache) in the background.
    ///
    /// The task keeps the store alive but only a weak handle to the loader;
    /// if every other handle is dropped before the retrieve finishes, no
    /// purge is issued.
    pub fn spawn_validate_cache(self: &Arc<Self>) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let loader = Arc::downgrade(self);

        tokio::spawn(async move {
            let retrieved = store.retrieve().await;
            match loader.upgrade() {
                Some(loader) => loader.purge_if_invalid(retrieved).await,
                None => tracing::debug!("feed loader released before cache validation finished"),
            }
        })
    }
}

#[async_trait::async_trait]
impl<S: FeedStore + ?Sized, Tz: TimeZone + Send + Sync> FeedLoader for LocalFeedLoader<S, Tz> {
    async fn load(&self) -> Result<Vec<FeedItem>, Error> {
        LocalFeedLoader::load(self).await
    }
}

#[async_trait::async_trait]
impl<S: FeedStore + ?Sized, Tz: TimeZone + Send + Sync> FeedCache for LocalFeedLoader<S, Tz> {
    async fn save(&self, feed: &[FeedItem]) -> Result<(), Error> {
        LocalFeedLoader::save(self, feed).await
    }
}
