//! Client-side behaviour: backend mode, cache freshness, storage, routing.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Seconds a successful query stays fresh.
const fn default_stale_secs() -> u64 {
    30
}

/// Simulated latency of the mock backend.
const fn default_mock_latency_ms() -> u64 {
    300
}

fn default_public_entry() -> String {
    "/".to_string()
}

fn default_login_route() -> String {
    "/login".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Use the in-memory mock backend instead of the REST backend.
    /// A flag persisted in client storage takes precedence.
    #[serde(default)]
    pub mock_mode: bool,

    /// Redirect unauthenticated sessions to the login route instead of the
    /// public entry point.
    #[serde(default)]
    pub dev_login: bool,

    #[serde(default = "default_stale_secs")]
    pub stale_secs: u64,

    #[serde(default = "default_mock_latency_ms")]
    pub mock_latency_ms: u64,

    /// Persisted client storage file. Empty means `~/.quill/storage.json`.
    #[serde(default)]
    pub storage_path: String,

    #[serde(default = "default_public_entry")]
    pub public_entry: String,

    #[serde(default = "default_login_route")]
    pub login_route: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            mock_mode: false,
            dev_login: false,
            stale_secs: default_stale_secs(),
            mock_latency_ms: default_mock_latency_ms(),
            storage_path: String::new(),
            public_entry: default_public_entry(),
            login_route: default_login_route(),
        }
    }
}

impl ClientConfig {
    /// Resolve the storage file location.
    pub fn storage_file(&self) -> Option<PathBuf> {
        if self.storage_path.is_empty() {
            dirs::home_dir().map(|home| home.join(".quill").join("storage.json"))
        } else {
            Some(PathBuf::from(&self.storage_path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ClientConfig::default();
        assert!(!config.mock_mode);
        assert!(!config.dev_login);
        assert_eq!(config.stale_secs, 30);
        assert_eq!(config.mock_latency_ms, 300);
        assert_eq!(config.public_entry, "/");
        assert_eq!(config.login_route, "/login");
    }

    #[test]
    fn explicit_storage_path_wins() {
        let config = ClientConfig {
            storage_path: "/tmp/quill.json".into(),
            ..Default::default()
        };
        assert_eq!(config.storage_file(), Some(PathBuf::from("/tmp/quill.json")));
    }

    #[test]
    fn default_storage_path_is_under_home() {
        if let Some(path) = ClientConfig::default().storage_file() {
            assert!(path.ends_with(".quill/storage.json"));
        }
    }
}
