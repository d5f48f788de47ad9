//! HTTP transport for the remote loaders.
//!
//! [`HttpClient`] is the only thing the loaders know about the network: a
//! GET that yields a status and a body. Any status is a successful transport
//! result; deciding what a status means is left to the mappers.
//!
//! [`ReqwestHttpClient`] enforces:
//! - Max redirects: 5
//! - Max body bytes: 5MB (configurable)
//! - Request timeout: 20s (configurable)

pub mod endpoint;

use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use reqwest::Client;
use url::Url;

use feedline_core::config::AppConfig;

pub use endpoint::{EndpointError, parse_endpoint};

#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// User agent string (default: "feedline/0.1")
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 5MB)
    pub max_bytes: usize,

    /// Request timeout (default: 20s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "feedline/0.1".to_string(),
            max_bytes: 5 * 1024 * 1024,
            timeout: Duration::from_millis(20000),
            max_redirects: 5,
        }
    }
}

impl From<&AppConfig> for HttpConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

/// Transport failures: no usable response was received.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("failed to build HTTP client: {0}")]
    Build(String),

    #[error("request timeout")]
    Timeout,

    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    #[error("response too large: {size} bytes exceeds {limit}")]
    TooLarge { size: u64, limit: usize },
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { HttpError::Timeout } else { HttpError::Network(Arc::new(err)) }
    }
}

#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &Url) -> Result<HttpResponse, HttpError>;
}

#[async_trait::async_trait]
impl<T: HttpClient + ?Sized> HttpClient for Arc<T> {
    async fn get(&self, url: &Url) -> Result<HttpResponse, HttpError> {
        (**self).get(url).await
    }
}

/// [`HttpClient`] over a shared reqwest connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    http: Client,
    config: HttpConfig,
}

impl ReqwestHttpClient {
    pub fn new(config: HttpConfig) -> Result<Self, HttpError> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;

        Ok(Self { http, config })
    }

    fn check_size(&self, size: u64) -> Result<(), HttpError> {
        if size > self.config.max_bytes as u64 {
            return Err(HttpError::TooLarge { size, limit: self.config.max_bytes });
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &Url) -> Result<HttpResponse, HttpError> {
        let start = Instant::now();

        let response = self.http.get(url.as_str()).send().await?;
        let status = response.status().as_u16();

        if let Some(len) = response.content_length() {
            self.check_size(len)?;
        }

        let body = response.bytes().await?;
        self.check_size(body.len() as u64)?;

        tracing::debug!(%url, status, bytes = body.len(), elapsed_ms = start.elapsed().as_millis() as u64, "GET");

        Ok(HttpResponse { status, body })
    }
}
