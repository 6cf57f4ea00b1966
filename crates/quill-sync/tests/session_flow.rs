//! Session lifecycle against the in-memory backend.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use quill_api::mock::{MOCK_PASSWORD, MOCK_TOKEN_PREFIX, MOCK_USERNAME};
use quill_api::{ApiClient, Method, MockBackend};
use quill_auth::storage::{self, TOKEN_KEY};
use quill_auth::{ClientStorage, FileStorage, GuardDecision, MemoryStorage, SessionState};
use quill_config::QuillConfig;
use quill_core::entities::User;
use quill_core::validation::LoginForm;
use quill_sync::{App, SubmitError, keys};

struct Harness {
    app: App,
    backend: Arc<MockBackend>,
    storage: Arc<MemoryStorage>,
}

fn harness_with(config: QuillConfig, storage: Arc<MemoryStorage>) -> Harness {
    let backend = Arc::new(MockBackend::new(storage.clone()));
    let app = App::with_api(config, storage.clone(), ApiClient::new(backend.clone()), true);
    Harness {
        app,
        backend,
        storage,
    }
}

fn harness() -> Harness {
    harness_with(QuillConfig::default(), Arc::new(MemoryStorage::new()))
}

fn demo_login() -> LoginForm {
    LoginForm {
        username: MOCK_USERNAME.into(),
        password: MOCK_PASSWORD.into(),
    }
}

#[tokio::test]
async fn empty_login_is_rejected_before_any_request() {
    let h = harness();

    let err = h.app.auth().login(&LoginForm::default()).await.unwrap_err();

    assert_eq!(err.field_message("username"), Some("Username is required"));
    assert_eq!(err.field_message("password"), Some("Password is required"));
    assert!(h.backend.requests().is_empty());
    assert_eq!(h.app.auth().state(), SessionState::Loading);
}

#[tokio::test]
async fn login_persists_token_and_logout_clears_it() {
    let h = harness();

    let user = h.app.auth().login(&demo_login()).await.unwrap();
    assert_eq!(user.username, MOCK_USERNAME);
    assert_eq!(h.app.auth().state(), SessionState::Authenticated(user.clone()));
    let token = h.storage.get(TOKEN_KEY).unwrap();
    assert!(token.starts_with(MOCK_TOKEN_PREFIX));
    assert_eq!(
        h.app
            .client()
            .get_data::<Option<User>>(&keys::current_user())
            .as_deref(),
        Some(&Some(user))
    );

    h.app.auth().logout().await.unwrap();
    assert_eq!(h.app.auth().state(), SessionState::Unauthenticated);
    assert_eq!(storage::load_token(h.storage.as_ref()), None);
    assert!(h.app.client().keys().is_empty());
    assert_eq!(h.backend.count(Method::Post, "/auth/logout"), 1);
}

#[tokio::test]
async fn wrong_password_surfaces_the_backend_status() {
    let h = harness();
    let form = LoginForm {
        username: MOCK_USERNAME.into(),
        password: "nope".into(),
    };

    let err = h.app.auth().login(&form).await.unwrap_err();

    assert!(matches!(err, SubmitError::Mutation(_)));
    assert_eq!(err.api_error().and_then(|e| e.status()), Some(401));
    assert_eq!(storage::load_token(h.storage.as_ref()), None);
    assert!(!h.app.auth().state().is_authenticated());
}

#[tokio::test]
async fn startup_without_token_settles_unauthenticated_offline() {
    let h = harness();

    let state = h.app.auth().initialize().await;

    assert_eq!(state, SessionState::Unauthenticated);
    assert!(h.backend.requests().is_empty());
}

#[tokio::test]
async fn stored_token_survives_a_restart_and_is_verified_once() {
    let storage = Arc::new(MemoryStorage::new());
    let first = harness_with(QuillConfig::default(), storage.clone());
    first.app.auth().login(&demo_login()).await.unwrap();

    let second = harness_with(QuillConfig::default(), storage);
    assert!(second.app.auth().initialize().await.is_authenticated());
    assert!(second.app.auth().initialize().await.is_authenticated());

    assert_eq!(second.backend.count(Method::Post, "/auth/verify"), 1);
}

#[tokio::test]
async fn file_storage_carries_the_session_between_processes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let mut config = QuillConfig::default();
    config.client.mock_latency_ms = 0;

    let storage = Arc::new(FileStorage::new(&path));
    storage::set_mock_mode(storage.as_ref(), true).unwrap();
    let first = App::build(config.clone(), storage).unwrap();
    assert!(first.is_mock());
    first.auth().login(&demo_login()).await.unwrap();

    let second = App::build(config, Arc::new(FileStorage::new(&path))).unwrap();
    let state = second.auth().initialize().await;
    assert_eq!(
        state.user().map(|user| user.username.as_str()),
        Some(MOCK_USERNAME)
    );

    second.auth().logout().await.unwrap();
    assert_eq!(storage::load_token(&FileStorage::new(&path)), None);
}

#[tokio::test]
async fn failed_verification_overrides_a_cached_user() {
    let storage = Arc::new(MemoryStorage::new());
    harness_with(QuillConfig::default(), storage.clone())
        .app
        .auth()
        .login(&demo_login())
        .await
        .unwrap();

    let h = harness_with(QuillConfig::default(), storage);
    assert!(h.app.auth().refresh_user().await.is_authenticated());
    assert!(h.app.client().get_data::<Option<User>>(&keys::current_user()).is_some());

    h.backend.fail_requests("/auth/verify", 401);
    let state = h.app.auth().initialize().await;

    assert_eq!(state, SessionState::Unauthenticated);
    assert_eq!(storage::load_token(h.storage.as_ref()), None);
    assert!(h.app.client().get_data::<Option<User>>(&keys::current_user()).is_none());
    assert_eq!(h.app.auth().refresh_user().await, SessionState::Unauthenticated);

    h.backend.clear_failures();
    assert!(h.app.auth().login(&demo_login()).await.is_ok());
    assert!(h.app.auth().state().is_authenticated());
}

#[tokio::test]
async fn unreachable_verification_keeps_the_token_for_a_retry() {
    let storage = Arc::new(MemoryStorage::new());
    let first = harness_with(QuillConfig::default(), storage.clone());
    first.app.auth().login(&demo_login()).await.unwrap();

    let second = harness_with(QuillConfig::default(), storage);
    second.backend.fail_requests("/auth/verify", 503);
    let state = second.app.auth().initialize().await;

    assert_eq!(state, SessionState::Unauthenticated);
    assert!(second.app.auth().token().is_some());
    assert_eq!(second.backend.count(Method::Get, "/auth/me"), 0);

    second.backend.clear_failures();
    assert!(second.app.auth().initialize().await.is_authenticated());
    assert_eq!(second.backend.count(Method::Post, "/auth/verify"), 2);
}

#[tokio::test]
async fn session_changes_are_published() {
    let h = harness();
    let mut rx = h.app.auth().subscribe();
    assert_eq!(*rx.borrow_and_update(), SessionState::Loading);

    h.app.auth().login(&demo_login()).await.unwrap();

    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().is_authenticated());
}

#[tokio::test]
async fn guard_follows_the_session() {
    let h = harness();
    let auth = h.app.auth();
    let guard = h.app.guard();

    assert_eq!(auth.guard(guard, "/dashboard"), GuardDecision::Placeholder);
    auth.initialize().await;
    assert_eq!(
        auth.guard(guard, "/dashboard"),
        GuardDecision::Redirect("/".into())
    );
    assert_eq!(auth.guard(guard, "/"), GuardDecision::Render);

    auth.login(&demo_login()).await.unwrap();
    assert_eq!(auth.guard(guard, "/dashboard"), GuardDecision::Render);
}

#[tokio::test]
async fn dev_login_redirects_to_login_route() {
    let mut config = QuillConfig::default();
    config.client.dev_login = true;
    let h = harness_with(config, Arc::new(MemoryStorage::new()));

    h.app.auth().initialize().await;

    assert_eq!(
        h.app.auth().guard(h.app.guard(), "/ab-testing"),
        GuardDecision::Redirect("/login".into())
    );
}
