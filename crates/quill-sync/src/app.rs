//! Composition root.
//!
//! [`App`] wires one query cache, one backend strategy, the client storage
//! and the session driver together, and hands out hook sets bound to them.

use std::sync::Arc;
use std::time::Duration;

use quill_api::ApiClient;
use quill_auth::storage::{self, ClientStorage};
use quill_auth::{FileStorage, RouteGuard};
use quill_config::QuillConfig;
use quill_query::{QueryClient, QueryConfig};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::auth_context::AuthContext;
use crate::error::SyncError;
use crate::hooks::{
    AbTestHooks, AnalyticsHooks, ContentHooks, SavedProjectHooks, SettingsHooks, TemplateHooks,
};
use crate::notifier::{Notifier, Toast};

#[derive(Debug, Clone)]
pub struct App {
    config: QuillConfig,
    client: QueryClient,
    api: ApiClient,
    storage: Arc<dyn ClientStorage>,
    auth: Arc<AuthContext>,
    guard: RouteGuard,
    mock_mode: bool,
}

impl App {
    /// Build from configuration with the default file storage.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Auth`] when no storage location can be resolved,
    /// and the errors of [`Self::build`].
    pub fn from_config(config: QuillConfig) -> Result<Self, SyncError> {
        let storage = Arc::new(FileStorage::from_config(&config.client)?);
        Self::build(config, storage)
    }

    /// Pick the backend once (a flag persisted in `storage` wins over the
    /// configuration) and wire everything to one cache.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Config`] when the REST backend is selected but
    /// not configured, or [`SyncError::Api`] if it cannot be built.
    pub fn build(config: QuillConfig, storage: Arc<dyn ClientStorage>) -> Result<Self, SyncError> {
        let mock_mode = storage::resolve_mock_mode(storage.as_ref(), &config.client);
        config.validate_for(mock_mode)?;
        let api = ApiClient::from_config(&config, Arc::clone(&storage), mock_mode)?;
        tracing::info!(backend = api.backend_name(), "quill client ready");
        Ok(Self::with_api(config, storage, api, mock_mode))
    }

    /// Wire an already-built service handle, e.g. one over a test backend.
    #[must_use]
    pub fn with_api(
        config: QuillConfig,
        storage: Arc<dyn ClientStorage>,
        api: ApiClient,
        mock_mode: bool,
    ) -> Self {
        let client = QueryClient::new(QueryConfig {
            stale_time: Duration::from_secs(config.client.stale_secs),
            ..QueryConfig::default()
        });
        let auth = Arc::new(AuthContext::new(
            client.clone(),
            api.clone(),
            Arc::clone(&storage),
        ));
        let guard = RouteGuard::from_config(&config.client);
        Self {
            config,
            client,
            api,
            storage,
            auth,
            guard,
            mock_mode,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &QuillConfig {
        &self.config
    }

    #[must_use]
    pub const fn client(&self) -> &QueryClient {
        &self.client
    }

    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub fn storage(&self) -> &dyn ClientStorage {
        self.storage.as_ref()
    }

    #[must_use]
    pub const fn auth(&self) -> &Arc<AuthContext> {
        &self.auth
    }

    #[must_use]
    pub const fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    #[must_use]
    pub const fn is_mock(&self) -> bool {
        self.mock_mode
    }

    #[must_use]
    pub fn ab_tests(&self) -> AbTestHooks {
        AbTestHooks::new(self.client.clone(), self.api.clone())
    }

    #[must_use]
    pub fn saved_projects(&self) -> SavedProjectHooks {
        SavedProjectHooks::new(self.client.clone(), self.api.clone())
    }

    #[must_use]
    pub fn templates(&self) -> TemplateHooks {
        TemplateHooks::new(self.client.clone(), self.api.clone())
    }

    #[must_use]
    pub fn contents(&self) -> ContentHooks {
        ContentHooks::new(self.client.clone(), self.api.clone())
    }

    #[must_use]
    pub fn settings(&self) -> SettingsHooks {
        SettingsHooks::new(self.client.clone(), self.api.clone())
    }

    #[must_use]
    pub fn analytics(&self) -> AnalyticsHooks {
        AnalyticsHooks::new(self.client.clone(), self.api.clone())
    }

    /// Start forwarding mutation toasts from this app's cache.
    pub fn notifier(&self, toasts: mpsc::UnboundedSender<Toast>) -> JoinHandle<()> {
        Notifier.spawn(self.client.subscribe(), toasts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_auth::MemoryStorage;
    use quill_config::ConfigError;

    #[test]
    fn persisted_flag_selects_mock_backend() {
        let storage = Arc::new(MemoryStorage::with(&[(storage::MOCK_MODE_KEY, "true")]));
        let app = App::build(QuillConfig::default(), storage).unwrap();
        assert!(app.is_mock());
        assert_eq!(app.api().backend_name(), "mock");
    }

    #[test]
    fn rest_backend_requires_a_base_url() {
        let storage = Arc::new(MemoryStorage::new());
        let mut config = QuillConfig::default();
        config.api.base_url = String::new();
        let err = App::build(config, storage).unwrap_err();
        assert!(matches!(
            err,
            SyncError::Config(ConfigError::NotConfigured { .. })
        ));
    }

    #[test]
    fn persisted_flag_can_force_rest() {
        let storage = Arc::new(MemoryStorage::with(&[(storage::MOCK_MODE_KEY, "false")]));
        let mut config = QuillConfig::default();
        config.client.mock_mode = true;
        config.api.base_url = "http://localhost:8000".into();
        let app = App::build(config, storage).unwrap();
        assert_eq!(app.api().backend_name(), "http");
    }

    #[test]
    fn stale_time_comes_from_config() {
        let mut config = QuillConfig::default();
        config.client.stale_secs = 5;
        let app = App::with_api(
            config,
            Arc::new(MemoryStorage::new()),
            ApiClient::new(Arc::new(quill_api::MockBackend::empty(Arc::new(
                MemoryStorage::new(),
            )))),
            true,
        );
        assert_eq!(app.client().config().stale_time, Duration::from_secs(5));
    }
}
