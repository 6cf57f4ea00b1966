//! The shared cache store.
//!
//! `QueryClient` is an explicit, cloneable handle to one cache. Build one at
//! the composition root and hand clones to every hook set; tests build their
//! own for isolation.

use std::any::Any;
use std::collections::HashMap;
use std::error::Error as StdError;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::broadcast;

use crate::entry::{AnyValue, CacheEntry, QueryState, Resolution};
use crate::error::{BoxError, QueryError};
use crate::event::CacheEvent;
use crate::key::QueryKey;
use crate::mutation::Mutation;
use crate::query::Query;

const DEFAULT_STALE_TIME: Duration = Duration::from_secs(30);
const DEFAULT_EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// How long a successful entry stays fresh.
    pub stale_time: Duration,
    /// Buffered events per subscriber before the slowest one lags.
    pub event_capacity: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            stale_time: DEFAULT_STALE_TIME,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

struct Inner {
    entries: Mutex<HashMap<QueryKey, CacheEntry>>,
    events: broadcast::Sender<CacheEvent>,
    config: QueryConfig,
}

/// Cloneable handle to a shared query cache.
#[derive(Clone)]
pub struct QueryClient {
    inner: Arc<Inner>,
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new(QueryConfig::default())
    }
}

impl std::fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryClient")
            .field("entries", &self.entries().len())
            .field("config", &self.inner.config)
            .finish()
    }
}

impl QueryClient {
    #[must_use]
    pub fn new(config: QueryConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            inner: Arc::new(Inner {
                entries: Mutex::new(HashMap::new()),
                events,
                config,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &QueryConfig {
        &self.inner.config
    }

    /// Subscribe to cache events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.inner.events.subscribe()
    }

    /// Create an observer for `key`. Nothing is fetched until it runs.
    pub fn query<T, F, Fut, E>(&self, key: QueryKey, fetch: F) -> Query<T>
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: StdError + Send + Sync + 'static,
    {
        Query::new(self.clone(), key, fetch)
    }

    /// Wrap a write operation. Declare invalidations with
    /// [`Mutation::invalidates`].
    pub fn mutation<I, O, F, Fut, E>(&self, name: impl Into<String>, mutate: F) -> Mutation<I, O>
    where
        I: Clone + Send + Sync + 'static,
        O: Send + Sync + 'static,
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, E>> + Send + 'static,
        E: StdError + Send + Sync + 'static,
    {
        Mutation::new(self.clone(), name.into(), mutate)
    }

    /// Fetch `key` now, regardless of freshness, and cache the result.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Fetch`] with the fetcher's error. The error is
    /// also recorded on the entry unless a later-issued fetch already
    /// resolved.
    pub async fn fetch<T, Fut, E>(
        &self,
        key: &QueryKey,
        fetch: impl FnOnce() -> Fut,
    ) -> Result<Arc<T>, QueryError>
    where
        T: Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>>,
        E: StdError + Send + Sync + 'static,
    {
        let ticket = self.begin_fetch(key);
        match fetch().await {
            Ok(value) => {
                let value = Arc::new(value);
                ticket.resolve(Ok(value.clone() as AnyValue), true);
                Ok(value)
            }
            Err(error) => {
                let error = QueryError::from_box(Box::new(error));
                ticket.resolve(Err(error.clone()), true);
                Err(error)
            }
        }
    }

    /// Snapshot of `key` typed as `T`.
    #[must_use]
    pub fn state<T: Send + Sync + 'static>(&self, key: &QueryKey) -> QueryState<T> {
        let entries = self.entries();
        let Some(entry) = entries.get(key) else {
            return QueryState::idle();
        };

        let mut error = entry.error.clone();
        let data = entry.data.clone().and_then(|value| {
            value.downcast::<T>().map_or_else(
                |_| {
                    error = Some(QueryError::TypeMismatch {
                        key: key.to_string(),
                    });
                    None
                },
                Some,
            )
        });

        QueryState {
            status: entry.status,
            data,
            error,
            is_fetching: entry.in_flight > 0,
            is_stale: !entry.is_fresh(self.inner.config.stale_time),
            fetched_at: entry.fetched_at,
        }
    }

    /// Cached data for `key`, fresh or not.
    #[must_use]
    pub fn get_data<T: Send + Sync + 'static>(&self, key: &QueryKey) -> Option<Arc<T>> {
        self.state::<T>(key).data
    }

    /// Write a value directly, marking the entry fresh.
    pub fn set_data<T: Send + Sync + 'static>(&self, key: &QueryKey, value: T) {
        self.entries()
            .entry(key.clone())
            .or_default()
            .set(Arc::new(value));
        tracing::debug!(%key, "cache entry set");
        self.emit(CacheEvent::Updated { key: key.clone() });
    }

    #[must_use]
    pub fn is_fresh(&self, key: &QueryKey) -> bool {
        self.entries()
            .get(key)
            .is_some_and(|entry| entry.is_fresh(self.inner.config.stale_time))
    }

    /// Mark every entry under `prefix` stale. Returns the affected keys.
    pub fn invalidate(&self, prefix: &QueryKey) -> Vec<QueryKey> {
        let mut keys = Vec::new();
        {
            let mut entries = self.entries();
            for (key, entry) in entries.iter_mut() {
                if key.starts_with(prefix) {
                    entry.invalidate();
                    keys.push(key.clone());
                }
            }
        }
        keys.sort();
        tracing::debug!(%prefix, count = keys.len(), "invalidated cache entries");
        if !keys.is_empty() {
            self.emit(CacheEvent::Invalidated { keys: keys.clone() });
        }
        keys
    }

    /// Drop every entry under `prefix`. Returns the removed keys.
    pub fn remove(&self, prefix: &QueryKey) -> Vec<QueryKey> {
        let mut keys = Vec::new();
        self.entries().retain(|key, _| {
            let matches = key.starts_with(prefix);
            if matches {
                keys.push(key.clone());
            }
            !matches
        });
        keys.sort();
        if !keys.is_empty() {
            self.emit(CacheEvent::Removed { keys: keys.clone() });
        }
        keys
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.remove(&QueryKey::from_segments(Vec::new()));
    }

    /// Every key currently cached, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<QueryKey> {
        let mut keys: Vec<_> = self.entries().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub(crate) fn begin_fetch(&self, key: &QueryKey) -> FetchTicket {
        let seq = self.entries().entry(key.clone()).or_default().begin_fetch();
        tracing::trace!(%key, seq, "fetch issued");
        FetchTicket {
            client: self.clone(),
            key: key.clone(),
            seq,
            settled: false,
        }
    }

    fn abandon(&self, key: &QueryKey, seq: u64) {
        if let Some(entry) = self.entries().get_mut(key) {
            entry.abandon();
        }
        tracing::debug!(%key, seq, "fetch cancelled before resolving");
    }

    fn resolve(
        &self,
        key: &QueryKey,
        seq: u64,
        result: Result<AnyValue, QueryError>,
        write: bool,
    ) -> Resolution {
        let failure = result.as_ref().err().map(ToString::to_string);
        let resolution = self
            .entries()
            .entry(key.clone())
            .or_default()
            .resolve(seq, result, write);

        match (resolution, failure) {
            (Resolution::Applied, None) => {
                self.emit(CacheEvent::Fetched { key: key.clone() });
            }
            (Resolution::Applied, Some(message)) => {
                tracing::warn!(%key, seq, error = %message, "query fetch failed");
                self.emit(CacheEvent::FetchFailed {
                    key: key.clone(),
                    message,
                });
            }
            (Resolution::Superseded, _) => {
                tracing::debug!(%key, seq, "dropping result superseded by a later fetch");
            }
            (Resolution::Discarded, _) => {
                tracing::debug!(%key, seq, "dropping result for unmounted observer");
            }
        }
        resolution
    }

    pub(crate) fn emit(&self, event: CacheEvent) {
        // No subscribers is fine.
        let _ = self.inner.events.send(event);
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<QueryKey, CacheEntry>> {
        self.inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// An issued fetch that has not resolved yet.
///
/// Dropping the ticket unresolved, e.g. when the awaiting future is
/// cancelled, settles the entry without writing to it.
pub(crate) struct FetchTicket {
    client: QueryClient,
    key: QueryKey,
    seq: u64,
    settled: bool,
}

impl FetchTicket {
    pub(crate) fn resolve(
        mut self,
        result: Result<AnyValue, QueryError>,
        write: bool,
    ) -> Resolution {
        self.settled = true;
        self.client.resolve(&self.key, self.seq, result, write)
    }
}

impl Drop for FetchTicket {
    fn drop(&mut self) {
        if !self.settled {
            self.client.abandon(&self.key, self.seq);
        }
    }
}

pub(crate) fn erase<T: Send + Sync + 'static>(
    result: Result<T, BoxError>,
) -> Result<AnyValue, QueryError> {
    result
        .map(|value| Arc::new(value) as Arc<dyn Any + Send + Sync>)
        .map_err(QueryError::from_box)
}
