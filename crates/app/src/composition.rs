//! Wiring of the remote and local loaders.
//!
//! - feed: remote first, saving what it loads; the cache when the remote fails
//! - images: the cache first; the remote when nothing is cached, saving what
//!   it loads

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use url::Url;

use feedline_client::{HttpConfig, RemoteFeedImageDataLoader, RemoteFeedLoader, ReqwestHttpClient};
use feedline_core::config::AppConfig;
use feedline_core::{CacheDb, CacheDecorator, FallbackComposite, LocalFeedImageDataLoader, LocalFeedLoader};

type Http = Arc<ReqwestHttpClient>;
type LocalFeed = Arc<LocalFeedLoader<CacheDb>>;
type LocalImages = Arc<LocalFeedImageDataLoader<CacheDb>>;

pub type FeedComposite = FallbackComposite<CacheDecorator<RemoteFeedLoader<Http>, LocalFeed>, LocalFeed>;
pub type ImageComposite = FallbackComposite<LocalImages, CacheDecorator<RemoteFeedImageDataLoader<Http>, LocalImages>>;

pub struct App {
    local_feed: LocalFeed,
    local_images: LocalImages,
    http: Http,
}

impl App {
    pub async fn open(config: &AppConfig) -> Result<Self> {
        let store = Arc::new(
            CacheDb::open(&config.db_path)
                .await
                .with_context(|| format!("failed to open cache at {}", config.db_path.display()))?,
        );
        let http = Arc::new(ReqwestHttpClient::new(HttpConfig::from(config))?);

        Ok(Self {
            local_feed: Arc::new(LocalFeedLoader::new(Arc::clone(&store), Utc::now)),
            local_images: Arc::new(LocalFeedImageDataLoader::new(store)),
            http,
        })
    }

    pub fn feed_loader(&self, feed_url: Url) -> FeedComposite {
        let remote = RemoteFeedLoader::new(feed_url, Arc::clone(&self.http));
        FallbackComposite::new(
            CacheDecorator::new(remote, Arc::clone(&self.local_feed)),
            Arc::clone(&self.local_feed),
        )
    }

    pub fn image_loader(&self) -> ImageComposite {
        let remote = RemoteFeedImageDataLoader::new(Arc::clone(&self.http));
        FallbackComposite::new(
            Arc::clone(&self.local_images),
            CacheDecorator::new(remote, Arc::clone(&self.local_images)),
        )
    }

    pub async fn validate_cache(&self) -> Result<()> {
        self.local_feed.spawn_validate_cache().await.context("cache validation task failed")
    }
}
