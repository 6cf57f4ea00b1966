//! Quill settings, merged from files and the environment.
//!
//! Four sections make up a [`QuillConfig`]: `[api]` for the REST backend,
//! `[client]` for cache and session behaviour, and the optional
//! `[wordpress]` and `[ai]` integrations. Each field can come from, lowest
//! precedence first:
//!
//! - the defaults compiled into each section,
//! - `config.toml` under the user's config directory (`quill/config.toml`),
//! - `.quill/config.toml` in the working directory,
//! - a `QUILL_<SECTION>__<FIELD>` variable, e.g. `QUILL_CLIENT__STALE_SECS=5`.
//!
//! ```no_run
//! use quill_config::QuillConfig;
//!
//! let config = QuillConfig::load_with_dotenv().expect("config");
//! config.validate_for(config.client.mock_mode).expect("usable backend");
//! ```

mod ai;
mod api;
mod client;
mod error;
mod wordpress;

pub use ai::AiConfig;
pub use api::ApiConfig;
pub use client::ClientConfig;
pub use error::ConfigError;
pub use wordpress::WordpressConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct QuillConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub wordpress: WordpressConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

/// Project file, relative to the working directory.
const PROJECT_CONFIG: &str = ".quill/config.toml";

/// Prefix shared by every override variable.
const ENV_PREFIX: &str = "QUILL_";

impl QuillConfig {
    /// Merge defaults, config files, and `QUILL_*` variables.
    ///
    /// A `.env` file is not read here; see [`Self::load_with_dotenv`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a file or variable does not fit
    /// the section it targets.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Export variables from the nearest `.env` file, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing or unreadable `.env` leaves the environment as it is.
        match Self::dotenv_file() {
            Some(path) => {
                let _ = dotenvy::from_path(path);
            }
            None => {
                let _ = dotenvy::dotenv();
            }
        }
        Self::load()
    }

    /// Sources in merge order. Exposed for tests that add their own layers.
    pub fn figment() -> Figment {
        Self::config_files()
            .into_iter()
            .fold(
                Figment::from(Serialized::defaults(Self::default())),
                |figment, file| figment.merge(Toml::file(file)),
            )
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Fail early when the selected backend cannot be reached.
    ///
    /// Mock mode needs nothing; the REST backend needs a well-formed URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] describing the first unusable field.
    pub fn validate_for(&self, mock_mode: bool) -> Result<(), ConfigError> {
        if mock_mode {
            return Ok(());
        }
        if !self.api.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "api".into(),
            });
        }
        self.api.endpoint().map(|_| ())
    }

    /// Existing config files, user file first so the project file wins.
    fn config_files() -> Vec<PathBuf> {
        let user = dirs::config_dir().map(|dir| dir.join("quill").join("config.toml"));
        user.into_iter()
            .chain(Some(PathBuf::from(PROJECT_CONFIG)))
            .filter(|path| path.exists())
            .collect()
    }

    /// A `.env` next to the crate, in `crates/`, or at the workspace root.
    fn dotenv_file() -> Option<PathBuf> {
        let manifest_dir = PathBuf::from(std::env::var_os("CARGO_MANIFEST_DIR")?);
        manifest_dir
            .ancestors()
            .take(3)
            .map(|dir| dir.join(".env"))
            .find(|path| path.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = QuillConfig::default();
        assert!(config.api.is_configured());
        assert!(!config.wordpress.is_configured());
        assert!(!config.ai.is_configured());
        assert!(!config.client.mock_mode);
    }

    #[test]
    fn mock_mode_skips_api_validation() {
        let mut config = QuillConfig::default();
        config.api.base_url = String::new();
        assert!(config.validate_for(true).is_ok());
        assert!(matches!(
            config.validate_for(false),
            Err(ConfigError::NotConfigured { .. })
        ));
    }
}
