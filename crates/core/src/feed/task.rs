//! Cancellable handle for a spawned load.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use tokio::task::JoinHandle;
use url::Url;

use super::FeedImageDataLoader;
use crate::Error;

/// A load running on the tokio runtime that can be cancelled.
///
/// `cancel` aborts the task, which drops the load future and with it whatever
/// inner load is currently in flight. Awaiting a cancelled task yields
/// [`Error::Cancelled`].
#[derive(Debug)]
pub struct LoaderTask<T> {
    handle: JoinHandle<Result<T, Error>>,
}

impl<T: Send + 'static> LoaderTask<T> {
    /// Spawn `load` onto the current runtime.
    pub fn spawn<F>(load: F) -> Self
    where
        F: Future<Output = Result<T, Error>> + Send + 'static,
    {
        Self { handle: tokio::spawn(load) }
    }
}

impl<T> LoaderTask<T> {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<T> Future for LoaderTask<T> {
    type Output = Result<T, Error>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle).poll(cx).map(|joined| match joined {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(Error::Cancelled),
            Err(e) => Err(Error::TaskFailed(e.to_string())),
        })
    }
}

/// Start loading image data for `url` as a cancellable task.
pub fn load_image_data_task<L>(loader: Arc<L>, url: Url) -> LoaderTask<Bytes>
where
    L: FeedImageDataLoader + ?Sized + 'static,
{
    LoaderTask::spawn(async move { loader.load_image_data(&url).await })
}
