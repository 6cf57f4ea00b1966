//! Decoding representative backend payloads into core entities.

use pretty_assertions::assert_eq;
use quill_core::entities::{AbTest, ContentTemplate, LoginResponse, SavedProject};
use quill_core::enums::{AbTestStatus, Platform, ProjectStatus, TemplateCategory};

#[test]
fn ab_test_from_backend_payload() {
    let json = r#"{
        "id": "ab-42",
        "title": "Spring Sale",
        "description": "Headline test for the spring campaign",
        "content": "Spring Sale: everything 20% off this week",
        "variants": [
            {"id": "var-a", "name": "Control", "content": "Spring Sale", "impressions": 120, "conversions": 9},
            {"id": "var-b", "name": "Variant B", "content": "Spring Sale!"}
        ],
        "status": "running",
        "created_at": "2024-03-01T09:30:00Z",
        "completed_at": null
    }"#;

    let test: AbTest = serde_json::from_str(json).expect("decode ab test");
    assert_eq!(test.status, AbTestStatus::Running);
    assert_eq!(test.variants.len(), 2);
    assert_eq!(test.variants[1].impressions, 0);
    assert!(test.completed_at.is_none());
    assert_eq!(test.leading_variant().map(|v| v.id.as_str()), Some("var-a"));
}

#[test]
fn saved_project_defaults_optional_fields() {
    let json = r#"{
        "id": "proj-1",
        "title": "Launch post",
        "content": "We are live",
        "created_at": "2024-03-01T09:30:00Z",
        "updated_at": "2024-03-02T10:00:00Z"
    }"#;

    let project: SavedProject = serde_json::from_str(json).expect("decode project");
    assert_eq!(project.status, ProjectStatus::Draft);
    assert_eq!(project.platform, Platform::Blog);
    assert!(project.keywords.is_empty());
}

#[test]
fn template_category_decodes() {
    let json = r#"{
        "id": "tpl-1",
        "name": "Product teaser",
        "content": "Meet {{product}}",
        "category": "social_media",
        "platform": "twitter"
    }"#;

    let template: ContentTemplate = serde_json::from_str(json).expect("decode template");
    assert_eq!(template.category, TemplateCategory::SocialMedia);
    assert_eq!(template.platform, Platform::Twitter);
    assert_eq!(template.description, "");
}

#[test]
fn login_response_without_roles() {
    let json = r#"{
        "token": "tok-123",
        "user": {"id": "u-1", "username": "demo", "name": "Demo User", "email": "demo@example.com"}
    }"#;

    let response: LoginResponse = serde_json::from_str(json).expect("decode login");
    assert_eq!(response.token, "tok-123");
    assert!(response.user.roles.is_empty());
    assert!(!response.user.has_role("admin"));
}
