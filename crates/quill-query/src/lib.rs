//! # quill-query
//!
//! Client-side data synchronization: a keyed cache of backend reads with
//! query observers and invalidating mutations.
//!
//! - [`QueryClient`] is the injectable cache store. Clone it freely; every
//!   clone shares one map.
//! - [`Query`] reads a key with stale-while-revalidate semantics and an
//!   `enabled` gate.
//! - [`Mutation`] wraps a write and invalidates declared key prefixes once
//!   the write resolves.
//! - [`CacheEvent`]s are broadcast for side effects such as notifications.
//!
//! ```
//! use quill_query::{QueryClient, query_key};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let client = QueryClient::default();
//! let query = client.query(query_key!["greeting"], || async {
//!     Ok::<_, std::io::Error>("hello".to_string())
//! });
//! let state = query.run().await;
//! assert_eq!(state.data.as_deref().map(String::as_str), Some("hello"));
//! # }
//! ```

mod client;
mod entry;
mod error;
mod event;
mod key;
mod mutation;
mod query;

pub use client::{QueryClient, QueryConfig};
pub use entry::{QueryState, QueryStatus};
pub use error::{BoxError, MutationError, QueryError, SharedError};
pub use event::CacheEvent;
pub use key::{KeySegment, QueryKey};
pub use mutation::{Mutation, MutationState};
pub use query::Query;
