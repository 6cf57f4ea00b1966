//! Cache keys, one constructor per resource shape.
//!
//! Lists and details of a resource share a root segment wherever one
//! invalidation should refresh both. Saved projects and templates keep
//! their detail entries under a separate singular root.

use quill_core::entities::PerformanceRange;
use quill_core::enums::{ProjectStatus, TemplateCategory};
use quill_query::{QueryKey, query_key};

#[must_use]
pub fn auth() -> QueryKey {
    query_key!["auth"]
}

#[must_use]
pub fn current_user() -> QueryKey {
    query_key!["auth", "me"]
}

#[must_use]
pub fn ab_tests() -> QueryKey {
    query_key!["abTests"]
}

#[must_use]
pub fn ab_test(id: &str) -> QueryKey {
    query_key!["abTests", id]
}

#[must_use]
pub fn saved_projects() -> QueryKey {
    query_key!["savedProjects"]
}

#[must_use]
pub fn saved_projects_with(status: Option<ProjectStatus>) -> QueryKey {
    status.map_or_else(saved_projects, |s| query_key!["savedProjects", s.as_str()])
}

#[must_use]
pub fn saved_project(id: &str) -> QueryKey {
    query_key!["savedProject", id]
}

#[must_use]
pub fn templates() -> QueryKey {
    query_key!["templates"]
}

#[must_use]
pub fn templates_in(category: Option<TemplateCategory>) -> QueryKey {
    category.map_or_else(templates, |c| query_key!["templates", c.as_str()])
}

#[must_use]
pub fn template(id: &str) -> QueryKey {
    query_key!["template", id]
}

#[must_use]
pub fn contents() -> QueryKey {
    query_key!["contents"]
}

#[must_use]
pub fn content(id: &str) -> QueryKey {
    query_key!["contents", id]
}

#[must_use]
pub fn account_settings() -> QueryKey {
    query_key!["settings", "account"]
}

#[must_use]
pub fn appearance_settings() -> QueryKey {
    query_key!["settings", "appearance"]
}

#[must_use]
pub fn performance(range: PerformanceRange) -> QueryKey {
    query_key!["analytics", "performance", range.days()]
}

#[must_use]
pub fn analytics_overview(range: PerformanceRange) -> QueryKey {
    query_key!["analytics", "overview", range.days()]
}
