//! Response mapping for the feed API.
//!
//! Wire format:
//!
//! ```json
//! {"items": [{"id": "<uuid>", "description": "...", "location": "...", "image": "<url>"}]}
//! ```
//!
//! `description` and `location` may be missing or null.

use bytes::Bytes;
use serde::Deserialize;
use url::Url;
use uuid::Uuid;

use feedline_core::{Error, FeedItem};

const OK_200: u16 = 200;

#[derive(Debug, Deserialize)]
struct Root {
    items: Vec<RemoteFeedItem>,
}

#[derive(Debug, Deserialize)]
struct RemoteFeedItem {
    id: Uuid,
    description: Option<String>,
    location: Option<String>,
    image: Url,
}

impl From<RemoteFeedItem> for FeedItem {
    fn from(item: RemoteFeedItem) -> Self {
        FeedItem::new(item.id, item.description, item.location, item.image)
    }
}

/// Map a feed response. Only a 200 with a decodable body yields items.
pub fn map_feed(body: &[u8], status: u16) -> Result<Vec<FeedItem>, Error> {
    if status != OK_200 {
        return Err(Error::InvalidData(format!("unexpected status {status}")));
    }

    let root: Root = serde_json::from_slice(body).map_err(|e| Error::InvalidData(e.to_string()))?;

    Ok(root.items.into_iter().map(FeedItem::from).collect())
}

/// Map an image response. Only a 200 with a non-empty body yields data.
pub fn map_image_data(body: Bytes, status: u16) -> Result<Bytes, Error> {
    if status != OK_200 {
        return Err(Error::InvalidData(format!("unexpected status {status}")));
    }
    if body.is_empty() {
        return Err(Error::InvalidData("empty image data".into()));
    }
    Ok(body)
}
