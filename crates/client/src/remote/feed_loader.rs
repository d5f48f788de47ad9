//! Feed loader backed by the HTTP feed endpoint.

use url::Url;

use feedline_core::{Error, FeedItem, FeedLoader};

use super::mapper::map_feed;
use crate::http::HttpClient;

#[derive(Debug)]
pub struct RemoteFeedLoader<C> {
    url: Url,
    client: C,
}

impl<C: HttpClient> RemoteFeedLoader<C> {
    pub fn new(url: Url, client: C) -> Self {
        Self { url, client }
    }
}

#[async_trait::async_trait]
impl<C: HttpClient> FeedLoader for RemoteFeedLoader<C> {
    async fn load(&self) -> Result<Vec<FeedItem>, Error> {
        let response = self.client.get(&self.url).await.map_err(|e| Error::Connectivity(e.to_string()))?;
        let feed = map_feed(&response.body, response.status)?;

        tracing::debug!(url = %self.url, items = feed.len(), "loaded remote feed");
        Ok(feed)
    }
}
