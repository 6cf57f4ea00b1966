//! Service methods against the in-memory backend.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use quill_api::mock::{MOCK_PASSWORD, MOCK_USERNAME};
use quill_api::{ApiClient, Method, MockBackend};
use quill_auth::storage::{self, ClientStorage};
use quill_auth::MemoryStorage;
use quill_core::enums::{AbTestStatus, ProjectStatus, Theme};
use quill_core::requests::{AppearanceUpdate, NewSavedProject, PasswordChange, SavedProjectUpdate};

fn setup() -> (ApiClient, Arc<MockBackend>, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let backend = Arc::new(MockBackend::new(storage.clone()));
    (ApiClient::new(backend.clone()), backend, storage)
}

#[tokio::test]
async fn login_issues_a_token_the_backend_accepts() {
    let (api, _, storage) = setup();
    assert!(api.current_user().await.unwrap().is_none());

    let response = api.login(MOCK_USERNAME, MOCK_PASSWORD).await.unwrap();
    storage::store_token(storage.as_ref(), &response.token).unwrap();

    assert!(api.verify_token().await.unwrap());
    let user = api.current_user().await.unwrap().expect("user");
    assert_eq!(user, response.user);
}

#[tokio::test]
async fn foreign_token_fails_verification() {
    let (api, _, storage) = setup();
    storage.set(storage::TOKEN_KEY, "expired-jwt").unwrap();
    assert!(!api.verify_token().await.unwrap());
    assert!(api.current_user().await.unwrap().is_none());
}

#[tokio::test]
async fn ab_test_actions_follow_the_lifecycle() {
    let (api, backend, _) = setup();
    let tests = api.list_ab_tests().await.unwrap();
    let running = tests
        .iter()
        .find(|t| t.status == AbTestStatus::Running)
        .expect("seeded running test");

    let completed = api.complete_ab_test(&running.id).await.unwrap();
    assert_eq!(completed.status, AbTestStatus::Completed);
    assert!(completed.completed_at.is_some());

    let err = api.start_ab_test(&running.id).await.unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert_eq!(backend.count(Method::Post, &format!("/ab-tests/{}/start", running.id)), 1);
}

#[tokio::test]
async fn saved_project_crud() {
    let (api, _, _) = setup();
    let created = api
        .create_saved_project(&NewSavedProject {
            title: "Launch post".into(),
            content: "We are live".into(),
            status: ProjectStatus::Draft,
            platform: quill_core::enums::Platform::Linkedin,
            keywords: vec!["launch".into()],
        })
        .await
        .unwrap();

    let updated = api
        .update_saved_project(
            &created.id,
            &SavedProjectUpdate {
                status: Some(ProjectStatus::Published),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, ProjectStatus::Published);
    assert_eq!(updated.title, "Launch post");

    let published = api
        .list_saved_projects(Some(ProjectStatus::Published))
        .await
        .unwrap();
    assert!(published.iter().any(|p| p.id == created.id));

    api.delete_saved_project(&created.id).await.unwrap();
    let err = api.get_saved_project(&created.id).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn appearance_update_merges_fields() {
    let (api, _, _) = setup();
    let before = api.appearance_settings().await.unwrap();
    let after = api
        .update_appearance_settings(&AppearanceUpdate {
            theme: Some(Theme::Dark),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(after.theme, Theme::Dark);
    assert_eq!(after.accent_color, before.accent_color);
}

#[tokio::test]
async fn password_change_requires_current_password() {
    let (api, _, _) = setup();
    let err = api
        .change_password(&PasswordChange {
            current_password: "nope".into(),
            new_password: "new-password".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));

    api.change_password(&PasswordChange {
        current_password: MOCK_PASSWORD.into(),
        new_password: "new-password".into(),
    })
    .await
    .unwrap();
    assert!(api.login(MOCK_USERNAME, MOCK_PASSWORD).await.is_err());
    assert!(api.login(MOCK_USERNAME, "new-password").await.is_ok());
}

#[tokio::test]
async fn seo_and_generation_round_out_the_editor() {
    let (api, _, _) = setup();
    let report = api
        .analyze_seo("Spring sale: everything is on sale.", &["sale".into()])
        .await
        .unwrap();
    assert!(report.score <= 100);
    assert_eq!(report.keyword_density[0].0, "sale");

    let draft = api
        .generate_content("Spring sale", quill_core::enums::Platform::Blog, &[])
        .await
        .unwrap();
    assert!(draft.starts_with("# Spring sale"));
}
