//! Query observers.
//!
//! A [`Query`] binds a key to a fetch function. Running it fetches only when
//! the cached entry is missing or stale; the previous data stays readable
//! while the refetch is in flight. Dropping the observer unmounts it: a
//! fetch that resolves afterwards is discarded without touching the cache.

use std::error::Error as StdError;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::task::JoinHandle;

use crate::client::{QueryClient, erase};
use crate::entry::QueryState;
use crate::error::BoxError;
use crate::key::QueryKey;

type Fetcher<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T, BoxError>> + Send + Sync>;

struct QueryInner<T> {
    client: QueryClient,
    key: QueryKey,
    fetch: Fetcher<T>,
    enabled: AtomicBool,
    mounted: AtomicBool,
}

impl<T> QueryInner<T> {
    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    fn needs_fetch(&self) -> bool {
        self.is_enabled() && self.is_mounted() && !self.client.is_fresh(&self.key)
    }
}

impl<T: Send + Sync + 'static> QueryInner<T> {
    async fn execute(&self) {
        let ticket = self.client.begin_fetch(&self.key);
        let result = (self.fetch)().await;
        ticket.resolve(erase(result), self.is_mounted());
    }
}

/// Observer of one cache key.
pub struct Query<T> {
    inner: Arc<QueryInner<T>>,
}

impl<T: Send + Sync + 'static> Query<T> {
    pub(crate) fn new<F, Fut, E>(client: QueryClient, key: QueryKey, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: StdError + Send + Sync + 'static,
    {
        let fetch: Fetcher<T> = Arc::new(move || {
            fetch()
                .map(|result| result.map_err(|error| Box::new(error) as BoxError))
                .boxed()
        });
        Self {
            inner: Arc::new(QueryInner {
                client,
                key,
                fetch,
                enabled: AtomicBool::new(true),
                mounted: AtomicBool::new(true),
            }),
        }
    }

    /// Gate fetching. A disabled query never calls its fetch function; use
    /// this when a required parameter such as an id is missing.
    #[must_use]
    pub fn enabled(self, enabled: bool) -> Self {
        self.set_enabled(enabled);
        self
    }

    /// Flip the gate on a mounted observer, e.g. once an id becomes known.
    pub fn set_enabled(&self, enabled: bool) {
        self.inner.enabled.store(enabled, Ordering::Release);
    }

    #[must_use]
    pub fn key(&self) -> &QueryKey {
        &self.inner.key
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.inner.is_enabled()
    }

    /// Current cached state for this key.
    #[must_use]
    pub fn state(&self) -> QueryState<T> {
        self.inner.client.state(&self.inner.key)
    }

    /// Whether running now would call the fetch function.
    #[must_use]
    pub fn needs_fetch(&self) -> bool {
        self.inner.needs_fetch()
    }

    /// Mount: fetch if the entry is missing or stale, then return the state.
    pub async fn run(&self) -> QueryState<T> {
        if self.inner.needs_fetch() {
            self.inner.execute().await;
        }
        self.state()
    }

    /// Fetch even if the entry is fresh. Disabled queries still do nothing.
    pub async fn refetch(&self) -> QueryState<T> {
        if self.inner.is_enabled() && self.inner.is_mounted() {
            self.inner.execute().await;
        }
        self.state()
    }

    /// Mount without waiting: start the fetch on the runtime and return.
    ///
    /// Returns `None` when no fetch was needed. [`Self::state`] keeps
    /// returning the previous data until the task resolves.
    #[must_use = "the handle is the only way to await the background fetch"]
    pub fn spawn(&self) -> Option<JoinHandle<()>> {
        if !self.inner.needs_fetch() {
            return None;
        }
        let inner = Arc::clone(&self.inner);
        // Register the fetch before returning so callers observe `is_fetching`.
        let ticket = inner.client.begin_fetch(&inner.key);
        Some(tokio::spawn(async move {
            let result = (inner.fetch)().await;
            ticket.resolve(erase(result), inner.is_mounted());
        }))
    }

    /// Point the observer at another key, then run as on mount.
    ///
    /// The previous key's in-flight fetch belongs to the old observer and is
    /// discarded. Setting the same key is a plain [`Self::run`].
    pub async fn set_key<F, Fut, E>(&mut self, key: QueryKey, fetch: F) -> QueryState<T>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: StdError + Send + Sync + 'static,
    {
        if key != self.inner.key {
            let enabled = self.is_enabled();
            *self = Self::new(self.inner.client.clone(), key, fetch).enabled(enabled);
        }
        self.run().await
    }

    /// Stop observing. Equivalent to dropping the query.
    pub fn unmount(self) {
        drop(self);
    }
}

impl<T> Drop for Query<T> {
    fn drop(&mut self) {
        self.inner.mounted.store(false, Ordering::Release);
    }
}

impl<T> std::fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Query")
            .field("key", &self.inner.key)
            .field("enabled", &self.inner.is_enabled())
            .finish_non_exhaustive()
    }
}
