//! Session driver.
//!
//! [`AuthContext`] owns the session state machine and feeds it from the
//! current-user query, the one-shot token verification, login and logout.
//! Every transition is published on a `watch` channel so observers always
//! see the latest state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use quill_api::ApiClient;
use quill_auth::storage::{self, ClientStorage};
use quill_auth::{GuardDecision, RouteGuard, Session, SessionEvent, SessionState};
use quill_core::entities::User;
use quill_core::requests::LoginRequest;
use quill_core::validation::LoginForm;
use quill_query::{Mutation, Query, QueryClient};
use tokio::sync::watch;

use crate::error::{SubmitError, SyncError};
use crate::forms;
use crate::hooks::names;
use crate::keys;

pub struct AuthContext {
    client: QueryClient,
    api: ApiClient,
    storage: Arc<dyn ClientStorage>,
    session: Mutex<Session>,
    state_tx: watch::Sender<SessionState>,
    verified: AtomicBool,
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("state", &*self.state_tx.borrow())
            .field("verified", &self.verified.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl AuthContext {
    #[must_use]
    pub fn new(client: QueryClient, api: ApiClient, storage: Arc<dyn ClientStorage>) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Loading);
        Self {
            client,
            api,
            storage,
            session: Mutex::new(Session::new()),
            state_tx,
            verified: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state_tx.borrow().clone()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        storage::load_token(self.storage.as_ref())
    }

    /// Observer for `["auth", "me"]`.
    ///
    /// Without a stored token the fetcher answers `None` locally instead of
    /// asking the backend.
    #[must_use]
    pub fn current_user(&self) -> Query<Option<User>> {
        let api = self.api.clone();
        let storage = Arc::clone(&self.storage);
        self.client.query(keys::current_user(), move || {
            let api = api.clone();
            let has_token = storage::load_token(storage.as_ref()).is_some();
            async move {
                if has_token {
                    api.current_user().await
                } else {
                    Ok(None)
                }
            }
        })
    }

    /// Exchange credentials for a token, persist it, and seed the
    /// current-user entry with the returned profile.
    #[must_use]
    pub fn login_mutation(&self) -> Mutation<LoginRequest, User> {
        let api = self.api.clone();
        let storage = Arc::clone(&self.storage);
        self.client
            .mutation(names::LOGIN, move |request: LoginRequest| {
                let api = api.clone();
                let storage = Arc::clone(&storage);
                async move {
                    let response = api.login(&request.username, &request.password).await?;
                    storage::store_token(storage.as_ref(), &response.token)?;
                    Ok::<_, SyncError>(response.user)
                }
            })
            .updates(|cache, _, user| cache.set_data(&keys::current_user(), Some(user.clone())))
    }

    /// Settle the session on startup.
    ///
    /// A stored token is verified once per context. A token the backend
    /// rejects is cleared and overrides whatever the cache still holds for
    /// the user. When verification cannot complete the token is kept, the
    /// session is unauthenticated for now, and the next call verifies again.
    pub async fn initialize(&self) -> SessionState {
        self.apply(SessionEvent::Restart);

        if self.token().is_some() && !self.verified.swap(true, Ordering::SeqCst) {
            match self.api.verify_token().await {
                Ok(true) => {}
                Ok(false) => {
                    self.reject_token();
                    return self.state();
                }
                Err(error) if error.is_unauthorized() => {
                    tracing::debug!(%error, "token verification refused");
                    self.reject_token();
                    return self.state();
                }
                Err(error) => {
                    tracing::warn!(%error, "token verification unavailable, keeping stored token");
                    self.verified.store(false, Ordering::SeqCst);
                    return self.apply(SessionEvent::CurrentUserFailed);
                }
            }
        }

        self.refresh_user().await
    }

    /// Re-run the current-user query and move the session to match.
    pub async fn refresh_user(&self) -> SessionState {
        self.apply(SessionEvent::Restart);
        let result = self.current_user().run().await;
        let event = if result.is_success() {
            SessionEvent::CurrentUserLoaded(result.data.as_deref().cloned().flatten())
        } else {
            if let Some(error) = &result.error {
                tracing::debug!(%error, "current user unavailable");
            }
            SessionEvent::CurrentUserFailed
        };
        self.apply(event)
    }

    /// Validate the form, log in, and mark the session authenticated.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Invalid`] for blank fields (nothing is sent)
    /// and [`SubmitError::Mutation`] when the backend rejects the
    /// credentials or the token cannot be persisted.
    pub async fn login(&self, form: &LoginForm) -> Result<User, SubmitError> {
        let user = forms::submit(form, &self.login_mutation()).await?;
        self.verified.store(true, Ordering::SeqCst);
        self.apply(SessionEvent::LoggedIn(user.clone()));
        tracing::info!(username = %user.username, "logged in");
        Ok(user)
    }

    /// End the session locally even if the backend call fails.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Auth`] if the stored token cannot be removed.
    /// The cache is cleared and the session is unauthenticated regardless.
    pub async fn logout(&self) -> Result<(), SyncError> {
        if self.token().is_some()
            && let Err(error) = self.api.logout().await
        {
            tracing::warn!(%error, "backend logout failed, clearing local session anyway");
        }
        let cleared = storage::clear_token(self.storage.as_ref());
        self.client.clear();
        self.apply(SessionEvent::LoggedOut);
        tracing::info!("logged out");
        cleared.map_err(SyncError::from)
    }

    #[must_use]
    pub fn guard(&self, guard: &RouteGuard, path: &str) -> GuardDecision {
        guard.evaluate(path, &self.state())
    }

    fn reject_token(&self) {
        if let Err(error) = storage::clear_token(self.storage.as_ref()) {
            tracing::warn!(%error, "could not clear rejected token");
        }
        self.client.remove(&keys::auth());
        self.apply(SessionEvent::TokenRejected);
        tracing::info!("stored token rejected");
    }

    fn apply(&self, event: SessionEvent) -> SessionState {
        let state = self.lock_session().apply(event).clone();
        self.state_tx.send_replace(state.clone());
        state
    }

    fn lock_session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
