//! Route guard: one decision per navigation, derived from the session.

use quill_config::ClientConfig;

use crate::session::SessionState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still loading; show a placeholder.
    Placeholder,
    Redirect(String),
    Render,
}

#[derive(Debug, Clone)]
pub struct RouteGuard {
    public_entry: String,
    login_route: String,
    dev_login: bool,
    public_routes: Vec<String>,
}

impl RouteGuard {
    #[must_use]
    pub fn new(public_entry: impl Into<String>, login_route: impl Into<String>) -> Self {
        Self {
            public_entry: normalize(&public_entry.into()),
            login_route: normalize(&login_route.into()),
            dev_login: false,
            public_routes: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.public_entry, &config.login_route).with_dev_login(config.dev_login)
    }

    /// Send unauthenticated sessions to the login route instead of the
    /// public entry point.
    #[must_use]
    pub const fn with_dev_login(mut self, dev_login: bool) -> Self {
        self.dev_login = dev_login;
        self
    }

    /// Mark an extra route as public. A trailing `/*` covers the subtree.
    #[must_use]
    pub fn with_public_route(mut self, route: &str) -> Self {
        self.public_routes.push(normalize(route));
        self
    }

    #[must_use]
    pub fn is_public(&self, path: &str) -> bool {
        let path = normalize(path);
        path == self.public_entry
            || path == self.login_route
            || self.public_routes.iter().any(|route| {
                route.strip_suffix("/*").map_or(route == &path, |base| {
                    path == base || path.starts_with(&format!("{base}/"))
                })
            })
    }

    /// Where unauthenticated sessions are sent.
    #[must_use]
    pub fn redirect_target(&self) -> &str {
        if self.dev_login {
            &self.login_route
        } else {
            &self.public_entry
        }
    }

    #[must_use]
    pub fn evaluate(&self, path: &str, session: &SessionState) -> GuardDecision {
        if self.is_public(path) {
            return GuardDecision::Render;
        }
        let decision = match session {
            SessionState::Loading => GuardDecision::Placeholder,
            SessionState::Unauthenticated => {
                GuardDecision::Redirect(self.redirect_target().to_string())
            }
            SessionState::Authenticated(_) => GuardDecision::Render,
        };
        tracing::debug!(path, session = session.as_str(), ?decision, "route guard");
        decision
    }
}

/// Leading slash, no trailing slash, query string dropped.
fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default().trim();
    let trimmed = path.trim_matches('/');
    format!("/{trimmed}")
}
