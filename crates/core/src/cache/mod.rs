//! Local feed cache backed by SQLite.
//!
//! - [`policy`] decides whether a snapshot is still fresh
//! - [`store`] defines the persistence contract, [`sqlite`] implements it
//!   on [`CacheDb`]
//! - [`local_loader`] and [`local_image_loader`] turn a store into feed and
//!   image data loaders and caches

pub mod connection;
pub mod hash;
pub mod local_image_loader;
pub mod local_loader;
pub mod migrations;
pub mod policy;
pub mod sqlite;
pub mod store;

pub use crate::Error;

pub use connection::CacheDb;
pub use local_image_loader::LocalFeedImageDataLoader;
pub use local_loader::LocalFeedLoader;
pub use store::{CachedFeed, FeedImageDataStore, FeedStore, LocalFeedItem};
