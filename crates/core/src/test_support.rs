//! Spies, stubs and fixtures shared by the unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::oneshot;
use url::Url;
use uuid::Uuid;

use crate::Error;
use crate::cache::{CachedFeed, FeedImageDataStore, FeedStore, LocalFeedItem};
use crate::feed::{FeedCache, FeedImageDataCache, FeedImageDataLoader, FeedItem, FeedLoader};

pub(crate) fn any_url() -> Url {
    Url::parse("https://any-url.com/image.png").unwrap()
}

pub(crate) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

pub(crate) fn unique_item() -> FeedItem {
    FeedItem::new(Uuid::new_v4(), Some("any description".into()), Some("any location".into()), any_url())
}

/// Two unique items plus their store-side mirrors, in the same order.
pub(crate) fn unique_feed() -> (Vec<FeedItem>, Vec<LocalFeedItem>) {
    let models = vec![unique_item(), FeedItem::new(Uuid::new_v4(), None, None, any_url())];
    let local = models.iter().map(LocalFeedItem::from).collect();
    (models, local)
}

/// Poll `condition` until it holds, failing the test after five seconds.
pub(crate) async fn wait_until(condition: impl Fn() -> bool) {
    for _ in 0..5_000 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    panic!("condition not met in time");
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ReceivedMessage {
    DeleteCachedFeed,
    Insert(Vec<LocalFeedItem>, DateTime<Utc>),
    Retrieve,
    InsertImageData(Vec<u8>, Url),
    RetrieveImageData(Url),
}

/// Store double that records every call and answers with stubbed outcomes.
///
/// `hold` parks the next call after it has been recorded until the returned
/// sender fires or is dropped.
pub(crate) struct FeedStoreSpy {
    messages: Mutex<Vec<ReceivedMessage>>,
    deletion: Mutex<Result<(), String>>,
    insertion: Mutex<Result<(), String>>,
    retrieval: Mutex<Result<Option<CachedFeed>, String>>,
    image_retrieval: Mutex<Result<Option<Bytes>, String>>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
}

impl FeedStoreSpy {
    pub(crate) fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            deletion: Mutex::new(Ok(())),
            insertion: Mutex::new(Ok(())),
            retrieval: Mutex::new(Ok(None)),
            image_retrieval: Mutex::new(Ok(None)),
            gate: Mutex::new(None),
        }
    }

    pub(crate) fn messages(&self) -> Vec<ReceivedMessage> {
        self.messages.lock().unwrap().clone()
    }

    pub(crate) fn fail_deletion(&self) {
        *self.deletion.lock().unwrap() = Err("deletion failed".into());
    }

    pub(crate) fn fail_insertion(&self) {
        *self.insertion.lock().unwrap() = Err("insertion failed".into());
    }

    pub(crate) fn fail_retrieval(&self) {
        *self.retrieval.lock().unwrap() = Err("retrieval failed".into());
    }

    pub(crate) fn stub_retrieval(&self, feed: Vec<LocalFeedItem>, timestamp: DateTime<Utc>) {
        *self.retrieval.lock().unwrap() = Ok(Some(CachedFeed { feed, timestamp }));
    }

    pub(crate) fn stub_image_data(&self, data: Option<Bytes>) {
        *self.image_retrieval.lock().unwrap() = Ok(data);
    }

    pub(crate) fn fail_image_retrieval(&self) {
        *self.image_retrieval.lock().unwrap() = Err("image retrieval failed".into());
    }

    pub(crate) fn hold(&self) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        *self.gate.lock().unwrap() = Some(gate);
        release
    }

    async fn record(&self, message: ReceivedMessage) {
        self.messages.lock().unwrap().push(message);
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }
}

#[async_trait::async_trait]
impl FeedStore for FeedStoreSpy {
    async fn delete_cached_feed(&self) -> Result<(), Error> {
        self.record(ReceivedMessage::DeleteCachedFeed).await;
        self.deletion.lock().unwrap().clone().map_err(Error::Deletion)
    }

    async fn insert(&self, feed: Vec<LocalFeedItem>, timestamp: DateTime<Utc>) -> Result<(), Error> {
        self.record(ReceivedMessage::Insert(feed, timestamp)).await;
        self.insertion.lock().unwrap().clone().map_err(Error::Insertion)
    }

    async fn retrieve(&self) -> Result<Option<CachedFeed>, Error> {
        self.record(ReceivedMessage::Retrieve).await;
        self.retrieval.lock().unwrap().clone().map_err(Error::Retrieval)
    }
}

#[async_trait::async_trait]
impl FeedImageDataStore for FeedStoreSpy {
    async fn insert_image_data(&self, data: &[u8], url: &Url) -> Result<(), Error> {
        self.record(ReceivedMessage::InsertImageData(data.to_vec(), url.clone())).await;
        self.insertion.lock().unwrap().clone().map_err(Error::Insertion)
    }

    async fn retrieve_image_data(&self, url: &Url) -> Result<Option<Bytes>, Error> {
        self.record(ReceivedMessage::RetrieveImageData(url.clone())).await;
        self.image_retrieval.lock().unwrap().clone().map_err(Error::Retrieval)
    }
}

/// Feed loader answering every call with the same outcome.
pub(crate) struct LoaderStub {
    result: Result<Vec<FeedItem>, String>,
    calls: AtomicUsize,
}

impl LoaderStub {
    pub(crate) fn succeeding(feed: Vec<FeedItem>) -> Self {
        Self { result: Ok(feed), calls: AtomicUsize::new(0) }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self { result: Err(message.into()), calls: AtomicUsize::new(0) }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl FeedLoader for LoaderStub {
    async fn load(&self) -> Result<Vec<FeedItem>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone().map_err(Error::Connectivity)
    }
}

/// Cache sink recording what it was asked to save.
pub(crate) struct FeedCacheSpy {
    saved_feeds: Mutex<Vec<Vec<FeedItem>>>,
    saved_image_data: Mutex<Vec<(Vec<u8>, Url)>>,
    fails: bool,
}

impl FeedCacheSpy {
    pub(crate) fn new() -> Self {
        Self { saved_feeds: Mutex::new(Vec::new()), saved_image_data: Mutex::new(Vec::new()), fails: false }
    }

    pub(crate) fn failing() -> Self {
        Self { fails: true, ..Self::new() }
    }

    pub(crate) fn saved_feeds(&self) -> Vec<Vec<FeedItem>> {
        self.saved_feeds.lock().unwrap().clone()
    }

    pub(crate) fn saved_image_data(&self) -> Vec<(Vec<u8>, Url)> {
        self.saved_image_data.lock().unwrap().clone()
    }

    fn outcome(&self) -> Result<(), Error> {
        if self.fails { Err(Error::Insertion("cache write failed".into())) } else { Ok(()) }
    }
}

#[async_trait::async_trait]
impl FeedCache for FeedCacheSpy {
    async fn save(&self, feed: &[FeedItem]) -> Result<(), Error> {
        self.saved_feeds.lock().unwrap().push(feed.to_vec());
        self.outcome()
    }
}

#[async_trait::async_trait]
impl FeedImageDataCache for FeedCacheSpy {
    async fn save_image_data(&self, data: &[u8], url: &Url) -> Result<(), Error> {
        self.saved_image_data.lock().unwrap().push((data.to_vec(), url.clone()));
        self.outcome()
    }
}

enum ImageDataOutcome {
    Data(Bytes),
    Failure(String),
    Pending,
}

/// Image data loader that records requests and loads dropped before finishing.
pub(crate) struct ImageDataLoaderSpy {
    outcome: ImageDataOutcome,
    requested: Mutex<Vec<Url>>,
    cancelled: Arc<Mutex<Vec<Url>>>,
}

impl ImageDataLoaderSpy {
    fn with(outcome: ImageDataOutcome) -> Self {
        Self { outcome, requested: Mutex::new(Vec::new()), cancelled: Arc::new(Mutex::new(Vec::new())) }
    }

    pub(crate) fn succeeding(data: Bytes) -> Self {
        Self::with(ImageDataOutcome::Data(data))
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self::with(ImageDataOutcome::Failure(message.into()))
    }

    /// Never completes; only cancellation ends the load.
    pub(crate) fn pending() -> Self {
        Self::with(ImageDataOutcome::Pending)
    }

    pub(crate) fn requested_urls(&self) -> Vec<Url> {
        self.requested.lock().unwrap().clone()
    }

    pub(crate) fn cancelled_urls(&self) -> Vec<Url> {
        self.cancelled.lock().unwrap().clone()
    }
}

struct CancelGuard {
    url: Option<Url>,
    cancelled: Arc<Mutex<Vec<Url>>>,
}

impl CancelGuard {
    fn disarm(mut self) {
        self.url = None;
    }
}

impl Drop for CancelGuard {
    fn drop(&mut self) {
        if let Some(url) = self.url.take() {
            self.cancelled.lock().unwrap().push(url);
        }
    }
}

#[async_trait::async_trait]
impl FeedImageDataLoader for ImageDataLoaderSpy {
    async fn load_image_data(&self, url: &Url) -> Result<Bytes, Error> {
        self.requested.lock().unwrap().push(url.clone());
        let guard = CancelGuard { url: Some(url.clone()), cancelled: Arc::clone(&self.cancelled) };

        let result = match &self.outcome {
            ImageDataOutcome::Data(data) => Ok(data.clone()),
            ImageDataOutcome::Failure(message) => Err(Error::Connectivity(message.clone())),
            ImageDataOutcome::Pending => std::future::pending().await,
        };

        guard.disarm();
        result
    }
}
