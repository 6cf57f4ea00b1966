pub mod ab_test;
pub mod analytics;
pub mod auth;
pub mod content;
pub mod dispatch;
pub mod mode;
pub mod notify;
pub mod project;
pub mod route;
pub mod settings;
pub mod template;

use std::sync::Arc;

use anyhow::Context;
use quill_query::QueryState;

/// The data of a settled query, or its error.
pub fn data<T>(state: QueryState<T>) -> anyhow::Result<Arc<T>> {
    if let Some(error) = state.error {
        return Err(error.into());
    }
    state.data.context("query returned no data")
}
