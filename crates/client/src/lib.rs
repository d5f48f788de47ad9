//! Network side of feedline.
//!
//! This crate provides the HTTP client contract with its reqwest
//! implementation, and the remote feed and image data loaders built on it.

pub mod http;
pub mod remote;

#[cfg(test)]
pub(crate) mod test_support;

pub use http::{HttpClient, HttpConfig, HttpError, HttpResponse, ReqwestHttpClient, parse_endpoint};
pub use remote::{RemoteFeedImageDataLoader, RemoteFeedLoader, map_feed, map_image_data};
