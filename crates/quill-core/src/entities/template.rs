use serde::{Deserialize, Serialize};

use crate::enums::{Platform, TemplateCategory};

/// A reusable content template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub content: String,
    #[serde(default)]
    pub category: TemplateCategory,
    #[serde(default)]
    pub platform: Platform,
}
