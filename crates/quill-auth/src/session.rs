//! Session state machine.
//!
//! ```text
//! Loading ──user──▶ Authenticated(User)
//!    │                   │ logout / token rejected
//!    └──none / error──▶ Unauthenticated ◀┘
//! ```
//!
//! A rejected token is sticky: once verification fails, a current-user
//! result that arrives later cannot re-authenticate the session. Only an
//! explicit login clears the override.

use std::fmt;

use quill_core::entities::User;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// The current-user query has not settled yet.
    #[default]
    Loading,
    Authenticated(User),
    Unauthenticated,
}

impl SessionState {
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Authenticated(_) => "authenticated",
            Self::Unauthenticated => "unauthenticated",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authenticated(user) => write!(f, "authenticated as {}", user.username),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Inputs that move the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The current-user query succeeded, with or without a user.
    CurrentUserLoaded(Option<User>),
    CurrentUserFailed,
    /// Stored-token verification failed.
    TokenRejected,
    LoggedIn(User),
    LoggedOut,
    /// The current-user query is running again.
    Restart,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
    token_rejected: bool,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether a rejected token currently overrides cached users.
    #[must_use]
    pub const fn token_rejected(&self) -> bool {
        self.token_rejected
    }

    pub fn apply(&mut self, event: SessionEvent) -> &SessionState {
        let next = match event {
            SessionEvent::CurrentUserLoaded(Some(user)) if !self.token_rejected => {
                SessionState::Authenticated(user)
            }
            SessionEvent::CurrentUserLoaded(_)
            | SessionEvent::CurrentUserFailed
            | SessionEvent::LoggedOut => SessionState::Unauthenticated,
            SessionEvent::TokenRejected => {
                self.token_rejected = true;
                SessionState::Unauthenticated
            }
            SessionEvent::LoggedIn(user) => {
                self.token_rejected = false;
                SessionState::Authenticated(user)
            }
            SessionEvent::Restart if self.token_rejected => SessionState::Unauthenticated,
            SessionEvent::Restart => SessionState::Loading,
        };

        if next != self.state {
            tracing::debug!(from = self.state.as_str(), to = next.as_str(), "session transition");
        }
        self.state = next;
        &self.state
    }
}
