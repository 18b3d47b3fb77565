//! Fetch resource
//!
//! Binds an address to a three-state result (`loading`, `data`, `error`)
//! that observers read through a [`tokio::sync::watch`] channel.
//!
//! At most one request is in flight. Starting a new load, calling
//! [`FetchResource::cancel`] or dropping the resource cancels the previous
//! request, and whatever that request eventually produces is thrown away:
//! each request carries the generation it was started under and only
//! publishes while that generation is still current. The check runs inside
//! the channel's write lock, so a superseded result can never slip in
//! between a newer load and its own publication.

use crate::api::{ApiError, FETCH_FAILED_MESSAGE, JsonSource};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Observable state of a [`FetchResource`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchState<T> {
    /// A request is in flight
    pub loading: bool,
    /// Payload of the last successful request; kept while reloading
    pub data: Option<T>,
    /// Generic user-facing message of the last failure
    pub error: Option<String>,
    generation: u64,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            data: None,
            error: None,
            generation: 0,
        }
    }
}

/// A cancellable JSON request bound to one address at a time
pub struct FetchResource<T> {
    source: Arc<dyn JsonSource>,
    state: Arc<watch::Sender<FetchState<T>>>,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl<T> FetchResource<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Create an idle resource reading from `source`
    #[must_use]
    pub fn new(source: Arc<dyn JsonSource>) -> Self {
        let (state, _) = watch::channel(FetchState::default());
        Self {
            source,
            state: Arc::new(state),
            generation: 0,
            task: None,
        }
    }

    /// Start fetching `url`, superseding any request in flight
    ///
    /// Must be called from within a Tokio runtime.
    pub fn load(&mut self, url: Url) {
        self.abort_task();
        let generation = self.advance(true);

        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        self.task = Some(tokio::spawn(async move {
            let result = match source.get_json(&url).await {
                Ok(value) => serde_json::from_value::<T>(value).map_err(ApiError::from),
                Err(e) => Err(e),
            };
            publish(&state, generation, &url, result);
        }));
    }

    /// Cancel the request in flight, if any
    ///
    /// Cancellation is silent: data and error stay as they were.
    pub fn cancel(&mut self) {
        if self.task.is_some() {
            debug!("fetch cancelled");
        }
        self.abort_task();
        self.advance(false);
    }

    /// Watch the state for changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.state.subscribe()
    }

    /// Copy of the current state
    #[must_use]
    pub fn snapshot(&self) -> FetchState<T> {
        self.state.borrow().clone()
    }

    /// Wait until no request is loading and return the state at that point
    pub async fn settled(&self) -> FetchState<T> {
        let mut rx = self.state.subscribe();
        match rx.wait_for(|state| !state.loading).await {
            Ok(state) => state.clone(),
            Err(_) => self.snapshot(),
        }
    }

    fn abort_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Bump the generation, making every older request stale
    fn advance(&mut self, loading: bool) -> u64 {
        self.generation += 1;
        let generation = self.generation;
        self.state.send_modify(|state| {
            state.generation = generation;
            state.loading = loading;
        });
        generation
    }
}

impl<T> Drop for FetchResource<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        let generation = self.generation + 1;
        self.state.send_modify(|state| state.generation = generation);
    }
}

fn publish<T>(
    state: &watch::Sender<FetchState<T>>,
    generation: u64,
    url: &Url,
    result: Result<T, ApiError>,
) {
    state.send_if_modified(|current| {
        if current.generation != generation {
            debug!("discarding superseded response for {url}");
            return false;
        }
        current.loading = false;
        match result {
            Ok(data) => {
                current.data = Some(data);
                current.error = None;
            }
            Err(e) if e.is_cancellation() => debug!("fetch aborted: {url}"),
            Err(e) => {
                warn!("fetch of {url} failed: {e}");
                current.error = Some(FETCH_FAILED_MESSAGE.to_string());
            }
        }
        true
    });
}
