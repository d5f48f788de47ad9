//! SQLite implementation of the feed and image data stores.
//!
//! The snapshot lives in two tables: `feed_cache` holds the single timestamp
//! row and `feed_cache_items` holds the items ordered by position. Inserts
//! clear both tables in the same transaction, so an insert without a prior
//! delete still leaves exactly one snapshot.

use bytes::Bytes;
use chrono::{DateTime, SecondsFormat, Utc};
use tokio_rusqlite::{params, rusqlite};
use url::Url;
use uuid::Uuid;

use super::connection::CacheDb;
use super::hash::image_data_key;
use super::store::{CachedFeed, FeedImageDataStore, FeedStore, LocalFeedItem};
use crate::Error;

/// Item columns as stored: id, description, location, url.
type RawItem = (String, Option<String>, Option<String>, String);

fn clear_feed(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
    conn.execute("DELETE FROM feed_cache_items", [])?;
    conn.execute("DELETE FROM feed_cache", [])?;
    Ok(())
}

fn decode_item((id, description, location, url): RawItem) -> Result<LocalFeedItem, Error> {
    let id = Uuid::parse_str(&id).map_err(|e| Error::Retrieval(format!("invalid item id '{id}': {e}")))?;
    let url = Url::parse(&url).map_err(|e| Error::Retrieval(format!("invalid item url '{url}': {e}")))?;
    Ok(LocalFeedItem { id, description, location, url })
}

fn decode_cached_feed((timestamp, items): (String, Vec<RawItem>)) -> Result<CachedFeed, Error> {
    let timestamp = DateTime::parse_from_rfc3339(&timestamp)
        .map_err(|e| Error::Retrieval(format!("invalid timestamp '{timestamp}': {e}")))?
        .with_timezone(&Utc);
    let feed = items.into_iter().map(decode_item).collect::<Result<Vec<_>, _>>()?;
    Ok(CachedFeed { feed, timestamp })
}

#[async_trait::async_trait]
impl FeedStore for CacheDb {
    async fn delete_cached_feed(&self) -> Result<(), Error> {
        self.conn
            .call(|conn| -> rusqlite::Result<()> {
                let tx = conn.transaction()?;
                clear_feed(&tx)?;
                tx.commit()
            })
            .await
            .map_err(|e| Error::Deletion(e.to_string()))?;

        tracing::debug!("deleted feed cache snapshot");
        Ok(())
    }

    async fn insert(&self, feed: Vec<LocalFeedItem>, timestamp: DateTime<Utc>) -> Result<(), Error> {
        let count = feed.len();
        let timestamp = timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true);

        self.conn
            .call(move |conn| -> rusqlite::Result<()> {
                let tx = conn.transaction()?;
                clear_feed(&tx)?;
                tx.execute("INSERT INTO feed_cache (id, timestamp) VALUES (1, ?1)", params![timestamp])?;
                {
                    let mut stmt = tx.prepare(
                        "INSERT INTO feed_cache_items (position, id, description, location, url)
                         VALUES (?1, ?2, ?3, ?4, ?5)",
                    )?;
                    for (position, item) in feed.iter().enumerate() {
                        stmt.execute(params![
                            position as i64,
                            item.id.to_string(),
                            &item.description,
                            &item.location,
                            item.url.as_str(),
                        ])?;
                    }
                }
                tx.commit()
            })
            .await
            .map_err(|e| Error::Insertion(e.to_string()))?;

        tracing::debug!(items = count, "inserted feed cache snapshot");
        Ok(())
    }

    async fn retrieve(&self) -> Result<Option<CachedFeed>, Error> {
        let raw = self
            .conn
            .call(|conn| -> rusqlite::Result<Option<(String, Vec<RawItem>)>> {
                let timestamp: String =
                    match conn.query_row("SELECT timestamp FROM feed_cache WHERE id = 1", [], |row| row.get(0)) {
                        Ok(timestamp) => timestamp,
                        Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
                        Err(e) => return Err(e),
                    };

                let mut stmt =
                    conn.prepare("SELECT id, description, location, url FROM feed_cache_items ORDER BY position")?;
                let items = stmt
                    .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)))?
                    .collect::<rusqlite::Result<Vec<RawItem>>>()?;

                Ok(Some((timestamp, items)))
            })
            .await
            .map_err(|e| Error::Retrieval(e.to_string()))?;

        raw.map(decode_cached_feed).transpose()
    }
}

#[async_trait::async_trait]
impl FeedImageDataStore for CacheDb {
    async fn insert_image_data(&self, data: &[u8], url: &Url) -> Result<(), Error> {
        let key = image_data_key(url);
        let url = url.to_string();
        let data = data.to_vec();

        self.conn
            .call(move |conn| -> rusqlite::Result<()> {
                conn.execute(
                    "INSERT INTO image_data (url_hash, url, data) VALUES (?1, ?2, ?3)
                     ON CONFLICT(url_hash) DO UPDATE SET
                        url = excluded.url,
                        data = excluded.data",
                    params![key, url, data],
                )?;
                Ok(())
            })
            .await
            .map_err(|e| Error::Insertion(e.to_string()))
    }

    async fn retrieve_image_data(&self, url: &Url) -> Result<Option<Bytes>, Error> {
        let key = image_data_key(url);

        let data = self
            .conn
            .call(move |conn| -> rusqlite::Result<Option<Vec<u8>>> {
                match conn.query_row("SELECT data FROM image_data WHERE url_hash = ?1", params![key], |row| row.get(0)) {
                    Ok(data) => Ok(Some(data)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e),
                }
            })
            .await
            .map_err(|e| Error::Retrieval(e.to_string()))?;

        Ok(data.map(Bytes::from))
    }
}
