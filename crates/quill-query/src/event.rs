//! Cache events.
//!
//! The cache publishes every state transition on a broadcast channel so UI
//! side effects (toasts, re-renders, logging) subscribe instead of being
//! wired into fetch and mutate callbacks.

use crate::key::QueryKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    /// A fetch result was written under `key`.
    Fetched { key: QueryKey },
    /// A fetch failed and its error was recorded under `key`.
    FetchFailed { key: QueryKey, message: String },
    /// A value was written directly, without a fetch.
    Updated { key: QueryKey },
    /// Entries were marked stale.
    Invalidated { keys: Vec<QueryKey> },
    /// Entries were dropped from the cache.
    Removed { keys: Vec<QueryKey> },
    /// A mutation resolved successfully and applied its invalidations.
    MutationSucceeded { name: String },
    /// A mutation failed; the cache was left untouched.
    MutationFailed { name: String, message: String },
}
