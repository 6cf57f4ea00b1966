use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{Platform, ProjectStatus};

/// A published or draft content item managed through `/contents`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Content {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
