//! Entity structs mirroring Quill backend resources.
//!
//! The client never owns authoritative state: every struct here is a cached,
//! possibly-stale copy of a backend record. All structs derive `Serialize`
//! and `Deserialize` with the backend's `snake_case` field names.

mod analytics;
mod content;
mod project;
mod seo;
mod settings;
mod template;
mod user;

pub use ab_test::{AbTest, AbTestVariant};
pub use analytics::{AnalyticsOverview, PerformancePoint, PerformanceRange};
pub use content::Content;
pub use project::SavedProject;
pub use seo::SeoReport;
pub use settings::{AccountSettings, AppearanceSettings};
pub use template::ContentTemplate;
pub use user::{LoginResponse, User};
