//! Hook sets over the in-memory backend: invalidation, enabled gating,
//! validation before submit, and toasts.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use quill_api::{ApiClient, ApiError, Method, MockBackend};
use quill_auth::MemoryStorage;
use quill_config::QuillConfig;
use quill_core::entities::{AccountSettings, PerformanceRange};
use quill_core::requests::SavedProjectUpdate;
use quill_core::validation::AbTestForm;
use quill_query::QueryStatus;
use quill_sync::hooks::MetricInput;
use quill_sync::{App, ToastVariant, forms, keys};
use quill_core::enums::AbMetric;
use tokio::sync::mpsc;

fn app() -> (App, Arc<MockBackend>) {
    let storage = Arc::new(MemoryStorage::new());
    let backend = Arc::new(MockBackend::new(storage.clone()));
    let app = App::with_api(
        QuillConfig::default(),
        storage,
        ApiClient::new(backend.clone()),
        true,
    );
    (app, backend)
}

fn spring_sale() -> AbTestForm {
    AbTestForm {
        title: "Spring Sale".into(),
        description: "Seasonal discount headline".into(),
        content: "Save 20% on every plan this spring".into(),
        variants: Vec::new(),
    }
}

#[tokio::test]
async fn creating_an_ab_test_invalidates_the_list() {
    let (app, backend) = app();
    let hooks = app.ab_tests();
    let list = hooks.list();
    let before = list.run().await.data.unwrap().len();
    assert!(app.client().is_fresh(&keys::ab_tests()));

    let created = forms::submit(&spring_sale(), &hooks.create()).await.unwrap();

    assert_eq!(created.title, "Spring Sale");
    assert_eq!(created.variants.len(), 2);
    assert_eq!(backend.count(Method::Post, "/ab-tests"), 1);
    assert!(list.state().is_stale);

    let after = list.run().await;
    assert_eq!(backend.count(Method::Get, "/ab-tests"), 2);
    let tests = after.data.unwrap();
    assert_eq!(tests.len(), before + 1);
    assert!(tests.iter().any(|t| t.id == created.id));
}

#[tokio::test]
async fn short_title_is_rejected_without_a_request() {
    let (app, backend) = app();
    let form = AbTestForm {
        title: "Sp".into(),
        ..spring_sale()
    };

    let err = forms::submit(&form, &app.ab_tests().create())
        .await
        .unwrap_err();

    assert_eq!(
        err.field_message("title"),
        Some("Title must be at least 3 characters")
    );
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn detail_without_an_id_never_fetches() {
    let (app, backend) = app();

    let detail = app.ab_tests().detail(None);
    let state = detail.run().await;

    assert!(!detail.is_enabled());
    assert_eq!(state.status, QueryStatus::Idle);
    assert!(backend.requests().is_empty());

    let blank = app.saved_projects().detail(Some("  "));
    blank.run().await;
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn detail_with_an_id_fetches_that_record() {
    let (app, backend) = app();

    let state = app.ab_tests().detail(Some("ab-1")).run().await;

    assert_eq!(state.data.unwrap().id, "ab-1");
    assert_eq!(backend.count(Method::Get, "/ab-tests/ab-1"), 1);
}

#[tokio::test]
async fn project_update_invalidates_list_and_detail() {
    let (app, _backend) = app();
    let hooks = app.saved_projects();
    hooks.list(None).run().await;
    hooks.detail(Some("proj-1")).run().await;
    let unrelated = hooks.detail(Some("proj-2"));
    unrelated.run().await;

    let update = SavedProjectUpdate {
        title: Some("Spring launch, final".into()),
        ..SavedProjectUpdate::default()
    };
    hooks
        .update()
        .mutate(("proj-1".into(), update))
        .await
        .unwrap();

    assert!(!app.client().is_fresh(&keys::saved_projects_with(None)));
    assert!(!app.client().is_fresh(&keys::saved_project("proj-1")));
    assert!(app.client().is_fresh(&keys::saved_project("proj-2")));
    let refreshed = hooks.detail(Some("proj-1")).run().await;
    assert_eq!(refreshed.data.unwrap().title, "Spring launch, final");
}

#[tokio::test]
async fn failed_mutation_leaves_the_cache_alone() {
    let (app, _backend) = app();
    let hooks = app.ab_tests();
    hooks.list().run().await;
    let start = hooks.start();

    let err = start.mutate("ab-1".into()).await.unwrap_err();

    assert_eq!(err.source_as::<ApiError>().and_then(ApiError::status), Some(409));
    assert!(start.error().is_some());
    assert!(app.client().is_fresh(&keys::ab_tests()));
}

#[tokio::test]
async fn recording_a_metric_refreshes_ab_tests() {
    let (app, _backend) = app();
    let hooks = app.ab_tests();
    hooks.detail(Some("ab-1")).run().await;

    let updated = hooks
        .record_metric()
        .mutate(MetricInput {
            test_id: "ab-1".into(),
            variant_id: "ab-1-v1".into(),
            metric: AbMetric::Impression,
        })
        .await
        .unwrap();

    assert_eq!(updated.variants[0].impressions, 1241);
    assert!(!app.client().is_fresh(&keys::ab_test("ab-1")));
}

#[tokio::test]
async fn performance_falls_back_to_generated_series() {
    let (app, backend) = app();
    backend.fail_requests("/analytics", 500);

    let state = app
        .analytics()
        .performance(PerformanceRange::default())
        .run()
        .await;

    assert!(state.is_success());
    assert_eq!(state.data.unwrap().len(), 31);
    assert_eq!(backend.count(Method::Get, "/analytics/performance"), 1);
}

#[tokio::test]
async fn account_update_refreshes_the_current_user() {
    let (app, _backend) = app();
    app.client().set_data(&keys::current_user(), None::<quill_core::entities::User>);
    assert!(app.client().is_fresh(&keys::current_user()));

    let saved = app
        .settings()
        .update_account()
        .mutate(AccountSettings {
            name: "Dana Writer".into(),
            email: "dana@example.com".into(),
            bio: String::new(),
            company: "Quill".into(),
        })
        .await
        .unwrap();

    assert_eq!(saved.name, "Dana Writer");
    assert!(!app.client().is_fresh(&keys::current_user()));
    assert!(app.client().is_fresh(&keys::account_settings()));
}

#[tokio::test]
async fn mutations_raise_toasts() {
    let (app, backend) = app();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let _notifier = app.notifier(tx);

    forms::submit(&spring_sale(), &app.ab_tests().create())
        .await
        .unwrap();
    let toast = rx.recv().await.unwrap();
    assert_eq!(toast.title, "A/B test created");
    assert_eq!(toast.variant, ToastVariant::Success);

    backend.fail_requests("/templates", 500);
    app.templates()
        .delete()
        .mutate("tpl-1".into())
        .await
        .unwrap_err();
    let toast = rx.recv().await.unwrap();
    assert_eq!(toast.variant, ToastVariant::Error);
    assert_eq!(toast.title, "Failed to save template");
}
