//! WordPress publishing backend configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WordpressConfig {
    /// Site URL (e.g., `https://blog.example.com`).
    #[serde(default)]
    pub url: String,

    /// Account used for application-password auth.
    #[serde(default)]
    pub username: String,

    /// Application password.
    #[serde(default)]
    pub app_password: String,
}

impl WordpressConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty()
    }

    /// Whether publishing credentials are present as well as the URL.
    #[must_use]
    pub fn can_publish(&self) -> bool {
        self.is_configured() && !self.username.is_empty() && !self.app_password.is_empty()
    }
}
