//! Test doubles for the HTTP client.

use std::sync::Mutex;

use bytes::Bytes;
use url::Url;

use crate::http::{HttpClient, HttpError, HttpResponse};

pub(crate) fn any_url() -> Url {
    Url::parse("https://any-url.com/feed").unwrap()
}

/// Records requested URLs and answers every GET with the stubbed outcome.
pub(crate) struct HttpClientSpy {
    requested: Mutex<Vec<Url>>,
    outcome: Mutex<Option<(u16, Bytes)>>,
}

impl HttpClientSpy {
    /// Every request fails at the transport level.
    pub(crate) fn failing() -> Self {
        Self { requested: Mutex::new(Vec::new()), outcome: Mutex::new(None) }
    }

    pub(crate) fn responding(status: u16, body: &[u8]) -> Self {
        Self { requested: Mutex::new(Vec::new()), outcome: Mutex::new(Some((status, Bytes::copy_from_slice(body)))) }
    }

    pub(crate) fn requested_urls(&self) -> Vec<Url> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HttpClient for HttpClientSpy {
    async fn get(&self, url: &Url) -> Result<HttpResponse, HttpError> {
        self.requested.lock().unwrap().push(url.clone());
        match self.outcome.lock().unwrap().clone() {
            Some((status, body)) => Ok(HttpResponse { status, body }),
            None => Err(HttpError::Timeout),
        }
    }
}
