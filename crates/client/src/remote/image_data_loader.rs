//! Image data loader that GETs the image URL.

use bytes::Bytes;
use url::Url;

use feedline_core::{Error, FeedImageDataLoader};

use super::mapper::map_image_data;
use crate::http::HttpClient;

#[derive(Debug)]
pub struct RemoteFeedImageDataLoader<C> {
    client: C,
}

impl<C: HttpClient> RemoteFeedImageDataLoader<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl<C: HttpClient> FeedImageDataLoader for RemoteFeedImageDataLoader<C> {
    async fn load_image_data(&self, url: &Url) -> Result<Bytes, Error> {
        let response = self.client.get(url).await.map_err(|e| Error::Connectivity(e.to_string()))?;
        map_image_data(response.body, response.status)
    }
}
