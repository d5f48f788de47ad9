//! Loaders that read the feed and its images from the network.
//!
//! A transport failure becomes [`Error::Connectivity`](feedline_core::Error::Connectivity);
//! a response that cannot be mapped becomes
//! [`Error::InvalidData`](feedline_core::Error::InvalidData).

pub mod feed_loader;
pub mod image_data_loader;
pub mod mapper;

pub use feed_loader::RemoteFeedLoader;
pub use image_data_loader::RemoteFeedImageDataLoader;
pub use mapper::{map_feed, map_image_data};
