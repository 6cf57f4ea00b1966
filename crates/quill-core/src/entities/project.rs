use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{Platform, ProjectStatus};

/// A content project saved from the editor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedProject {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
