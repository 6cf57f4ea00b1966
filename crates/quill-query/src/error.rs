//! Query and mutation error types.
//!
//! Fetch and mutate failures keep the caller's original error behind an
//! `Arc` so the state can be cloned into every observer and still be
//! downcast back to the service error type.

use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;

/// Boxed error returned by erased fetch and mutate functions.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Shared error produced by a fetch or a mutation.
pub type SharedError = Arc<dyn StdError + Send + Sync>;

#[derive(Debug, Clone, Error)]
pub enum QueryError {
    /// The fetch function failed.
    #[error(transparent)]
    Fetch(SharedError),

    /// The cached value under this key has a different type than requested.
    #[error("cached value for {key} has a different type")]
    TypeMismatch { key: String },
}

impl QueryError {
    pub(crate) fn from_box(error: BoxError) -> Self {
        Self::Fetch(Arc::from(error))
    }

    /// Downcast a fetch failure back to the error type the fetcher returned.
    #[must_use]
    pub fn source_as<E: StdError + 'static>(&self) -> Option<&E> {
        match self {
            Self::Fetch(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum MutationError {
    /// The mutate function failed. The cache was not touched.
    #[error(transparent)]
    Failed(SharedError),
}

impl MutationError {
    pub(crate) fn from_box(error: BoxError) -> Self {
        Self::Failed(Arc::from(error))
    }

    /// Downcast back to the error type the mutate function returned.
    #[must_use]
    pub fn source_as<E: StdError + 'static>(&self) -> Option<&E> {
        match self {
            Self::Failed(inner) => inner.downcast_ref::<E>(),
        }
    }
}
