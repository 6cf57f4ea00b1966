//! Cache entries and the observer-facing query state.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::error::QueryError;

pub(crate) type AnyValue = Arc<dyn Any + Send + Sync>;

/// Lifecycle of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QueryStatus {
    /// Never fetched.
    #[default]
    Idle,
    /// First fetch in flight; no data yet.
    Loading,
    /// Last applied fetch failed. Prior data, if any, is kept.
    Error,
    /// Last applied fetch succeeded.
    Success,
}

/// One slot of the cache.
///
/// Fetches for the same key are ordered by a per-entry sequence number
/// taken at issue time. A resolution is applied only if it was issued after
/// the last applied one, so a slow early request never overwrites a newer
/// result.
#[derive(Default)]
pub(crate) struct CacheEntry {
    pub(crate) data: Option<AnyValue>,
    pub(crate) error: Option<QueryError>,
    pub(crate) status: QueryStatus,
    pub(crate) fetched_at: Option<DateTime<Utc>>,
    pub(crate) fetched_instant: Option<Instant>,
    pub(crate) invalidated: bool,
    /// Highest sequence number handed out.
    pub(crate) issued_seq: u64,
    /// Sequence number of the last applied resolution.
    pub(crate) applied_seq: u64,
    /// Fetches issued at or below this sequence started before the last
    /// invalidation and cannot make the entry fresh.
    pub(crate) invalidated_through: u64,
    pub(crate) in_flight: usize,
}

/// Outcome of resolving a fetch against its entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resolution {
    Applied,
    /// A later-issued fetch was already applied.
    Superseded,
    /// The observer unmounted before the fetch resolved.
    Discarded,
}

impl CacheEntry {
    pub(crate) fn begin_fetch(&mut self) -> u64 {
        self.issued_seq += 1;
        self.in_flight += 1;
        if self.data.is_none() && self.status != QueryStatus::Error {
            self.status = QueryStatus::Loading;
        }
        self.issued_seq
    }

    pub(crate) fn resolve(
        &mut self,
        seq: u64,
        result: Result<AnyValue, QueryError>,
        write: bool,
    ) -> Resolution {
        if !write {
            self.abandon();
            return Resolution::Discarded;
        }
        if seq <= self.applied_seq {
            self.abandon();
            return Resolution::Superseded;
        }

        self.in_flight = self.in_flight.saturating_sub(1);
        self.applied_seq = seq;
        match result {
            Ok(value) => {
                self.data = Some(value);
                self.error = None;
                self.status = QueryStatus::Success;
                self.fetched_at = Some(Utc::now());
                self.fetched_instant = Some(Instant::now());
                self.invalidated = seq <= self.invalidated_through;
            }
            Err(error) => {
                self.error = Some(error);
                self.status = QueryStatus::Error;
            }
        }
        Resolution::Applied
    }

    /// Settle a fetch without applying anything.
    pub(crate) fn abandon(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        // A dropped first fetch leaves nothing loading.
        if self.in_flight == 0 && self.status == QueryStatus::Loading {
            self.status = QueryStatus::Idle;
        }
    }

    /// Write a value directly, superseding every fetch issued so far.
    pub(crate) fn set(&mut self, value: AnyValue) {
        self.applied_seq = self.issued_seq;
        self.data = Some(value);
        self.error = None;
        self.status = QueryStatus::Success;
        self.fetched_at = Some(Utc::now());
        self.fetched_instant = Some(Instant::now());
        self.invalidated = false;
    }

    pub(crate) fn invalidate(&mut self) {
        self.invalidated = true;
        self.invalidated_through = self.issued_seq;
    }

    pub(crate) fn is_fresh(&self, stale_time: Duration) -> bool {
        self.status == QueryStatus::Success
            && !self.invalidated
            && self
                .fetched_instant
                .is_some_and(|at| at.elapsed() < stale_time)
    }
}

/// Snapshot of one key as seen by an observer.
pub struct QueryState<T> {
    pub status: QueryStatus,
    /// Latest successful data. Survives later failures and refetches.
    pub data: Option<Arc<T>>,
    pub error: Option<QueryError>,
    /// A fetch for this key is in flight.
    pub is_fetching: bool,
    /// The entry was invalidated or has outlived its stale time.
    pub is_stale: bool,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl<T> QueryState<T> {
    pub(crate) fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            is_fetching: false,
            is_stale: true,
            fetched_at: None,
        }
    }

    /// No data yet and the first fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Error
    }
}

impl<T> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        Self {
            status: self.status,
            data: self.data.clone(),
            error: self.error.clone(),
            is_fetching: self.is_fetching,
            is_stale: self.is_stale,
            fetched_at: self.fetched_at,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for QueryState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryState")
            .field("status", &self.status)
            .field("data", &self.data)
            .field("error", &self.error)
            .field("is_fetching", &self.is_fetching)
            .field("is_stale", &self.is_stale)
            .finish_non_exhaustive()
    }
}
