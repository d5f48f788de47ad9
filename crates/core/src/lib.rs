//! Core types and shared functionality for feedline.
//!
//! This crate provides:
//! - The feed domain model and the loader/cache capabilities
//! - The feed cache: expiry policy, store contract, SQLite store, local loaders
//! - Fallback and cache-decorator composites
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod compose;
pub mod config;
pub mod error;
pub mod feed;

#[cfg(test)]
pub(crate) mod test_support;

pub use cache::{CacheDb, CachedFeed, FeedStore, LocalFeedImageDataLoader, LocalFeedItem, LocalFeedLoader};
pub use compose::{CacheDecorator, FallbackComposite};
pub use error::Error;
pub use feed::{FeedCache, FeedImageDataCache, FeedImageDataLoader, FeedItem, FeedLoader, LoaderTask};
