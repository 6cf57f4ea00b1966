//! Per-resource hook sets.
//!
//! Each set binds service methods to cache keys: reads become [`Query`]
//! observers, writes become [`Mutation`]s that declare which key prefixes
//! they invalidate. Detail queries are disabled until an id is known.
//!
//! [`Query`]: quill_query::Query
//! [`Mutation`]: quill_query::Mutation

mod ab_tests;
mod analytics;
mod contents;
mod saved_projects;
mod settings;
mod templates;

pub use ab_tests::{AbTestHooks, MetricInput};
pub use analytics::AnalyticsHooks;
pub use contents::ContentHooks;
pub use saved_projects::SavedProjectHooks;
pub use settings::SettingsHooks;
pub use templates::TemplateHooks;

use std::future::Future;

use quill_api::ApiClient;

/// Mutation names, as published in cache events.
pub mod names {
    pub const CREATE_AB_TEST: &str = "createAbTest";
    pub const START_AB_TEST: &str = "startAbTest";
    pub const COMPLETE_AB_TEST: &str = "completeAbTest";
    pub const RECORD_AB_METRIC: &str = "recordAbTestMetric";
    pub const DELETE_AB_TEST: &str = "deleteAbTest";

    pub const CREATE_SAVED_PROJECT: &str = "createSavedProject";
    pub const UPDATE_SAVED_PROJECT: &str = "updateSavedProject";
    pub const DELETE_SAVED_PROJECT: &str = "deleteSavedProject";

    pub const CREATE_TEMPLATE: &str = "createTemplate";
    pub const UPDATE_TEMPLATE: &str = "updateTemplate";
    pub const DELETE_TEMPLATE: &str = "deleteTemplate";

    pub const CREATE_CONTENT: &str = "createContent";
    pub const UPDATE_CONTENT: &str = "updateContent";
    pub const DELETE_CONTENT: &str = "deleteContent";
    pub const ENHANCE_CONTENT: &str = "enhanceContent";
    pub const GENERATE_CONTENT: &str = "generateContent";
    pub const ANALYZE_SEO: &str = "analyzeSeo";

    pub const UPDATE_ACCOUNT: &str = "updateAccountSettings";
    pub const UPDATE_APPEARANCE: &str = "updateAppearanceSettings";
    pub const CHANGE_PASSWORD: &str = "changePassword";

    pub const LOGIN: &str = "login";
}

/// Zero-argument fetcher that calls `call` with a fresh handle each time.
fn fetch_with<F, Fut>(api: &ApiClient, call: F) -> impl Fn() -> Fut + Send + Sync + 'static
where
    F: Fn(ApiClient) -> Fut + Send + Sync + 'static,
    Fut: Future,
{
    let api = api.clone();
    move || call(api.clone())
}

/// Mutate function that calls `call` with a fresh handle and the input.
fn mutate_with<I, F, Fut>(api: &ApiClient, call: F) -> impl Fn(I) -> Fut + Send + Sync + 'static
where
    F: Fn(ApiClient, I) -> Fut + Send + Sync + 'static,
    Fut: Future,
{
    let api = api.clone();
    move |input| call(api.clone(), input)
}

/// Trimmed id, or `None` when there is nothing to fetch.
fn present(id: Option<&str>) -> Option<String> {
    id.map(str::trim).filter(|id| !id.is_empty()).map(str::to_string)
}
