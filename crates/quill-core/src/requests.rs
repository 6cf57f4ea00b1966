//! Request payloads sent to the backend.
//!
//! Create payloads are produced by the validated forms in
//! [`crate::validation`]; update payloads use `Option` fields and skip
//! whatever the caller left untouched.

use serde::{Deserialize, Serialize};

use crate::enums::{AbMetric, Platform, ProjectStatus, TemplateCategory, Theme};

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// A variant supplied when creating an A/B test.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewVariant {
    pub name: String,
    pub content: String,
}

/// Body of `POST /ab-tests`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewAbTest {
    pub title: String,
    pub description: String,
    pub content: String,
    pub variants: Vec<NewVariant>,
}

/// Body of `POST /ab-tests/:id/metrics`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordMetric {
    pub variant_id: String,
    pub metric: AbMetric,
}

/// Body of `POST /saved-projects`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewSavedProject {
    pub title: String,
    pub content: String,
    pub status: ProjectStatus,
    pub platform: Platform,
    pub keywords: Vec<String>,
}

/// Body of `PUT /saved-projects/:id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

/// Body of `POST /templates`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTemplate {
    pub name: String,
    pub description: String,
    pub content: String,
    pub category: TemplateCategory,
    pub platform: Platform,
}

/// Body of `PUT /templates/:id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<TemplateCategory>,
}

/// Body of `POST /contents`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewContent {
    pub title: String,
    pub body: String,
    pub platform: Platform,
    pub keywords: Vec<String>,
}

/// Body of `PUT /contents/:id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
}

/// Body of `POST /contents/enhance`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnhanceRequest {
    pub content: String,
    /// What the rewrite should optimise for, e.g. `"clarity"` or `"seo"`.
    pub goal: String,
}

/// Body of `POST /contents/generate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateRequest {
    pub prompt: String,
    pub platform: Platform,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Text returned by the enhance/generate actions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratedText {
    pub content: String,
}

/// Body of `POST /seo/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeoRequest {
    pub content: String,
    pub keywords: Vec<String>,
}

/// Body of `PUT /settings/appearance`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppearanceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compact_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u8>,
}

/// Body of `POST /settings/password`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn updates_skip_untouched_fields() {
        let update = SavedProjectUpdate {
            status: Some(ProjectStatus::Published),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "published" }));
    }

    #[test]
    fn record_metric_wire_shape() {
        let body = RecordMetric {
            variant_id: "var-a".into(),
            metric: AbMetric::Conversion,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "variant_id": "var-a", "metric": "conversion" })
        );
    }
}
