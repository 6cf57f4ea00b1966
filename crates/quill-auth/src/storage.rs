//! Persisted client storage.
//!
//! A flat string key/value store that outlives the process. Two keys are
//! meaningful to the client: [`TOKEN_KEY`] holds the bearer token and
//! [`MOCK_MODE_KEY`] overrides the configured backend selection.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use quill_config::ClientConfig;

use crate::error::AuthError;

pub const TOKEN_KEY: &str = "auth_token";
pub const MOCK_MODE_KEY: &str = "use_mock_api";

/// String key/value storage shared by the backend and the session driver.
pub trait ClientStorage: Send + Sync + fmt::Debug {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if the value cannot be persisted.
    fn set(&self, key: &str, value: &str) -> Result<(), AuthError>;

    /// Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if the change cannot be persisted.
    fn remove(&self, key: &str) -> Result<(), AuthError>;
}

/// The stored bearer token, ignoring blank values.
#[must_use]
pub fn load_token(storage: &dyn ClientStorage) -> Option<String> {
    storage
        .get(TOKEN_KEY)
        .filter(|token| !token.trim().is_empty())
}

/// # Errors
///
/// Returns [`AuthError::Storage`] if the token cannot be persisted.
pub fn store_token(storage: &dyn ClientStorage, token: &str) -> Result<(), AuthError> {
    storage.set(TOKEN_KEY, token)
}

/// # Errors
///
/// Returns [`AuthError::Storage`] if the token cannot be removed.
pub fn clear_token(storage: &dyn ClientStorage) -> Result<(), AuthError> {
    storage.remove(TOKEN_KEY)
}

/// The persisted backend override, if one was ever set.
#[must_use]
pub fn mock_mode(storage: &dyn ClientStorage) -> Option<bool> {
    match storage.get(MOCK_MODE_KEY)?.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        other => {
            tracing::warn!(value = other, "ignoring unrecognised {MOCK_MODE_KEY} value");
            None
        }
    }
}

/// # Errors
///
/// Returns [`AuthError::Storage`] if the flag cannot be persisted.
pub fn set_mock_mode(storage: &dyn ClientStorage, enabled: bool) -> Result<(), AuthError> {
    storage.set(MOCK_MODE_KEY, if enabled { "true" } else { "false" })
}

/// Decide the backend once: the persisted flag wins over configuration.
#[must_use]
pub fn resolve_mock_mode(storage: &dyn ClientStorage, config: &ClientConfig) -> bool {
    mock_mode(storage).unwrap_or(config.mock_mode)
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated storage, e.g. a session with a token already stored.
    #[must_use]
    pub fn with(entries: &[(&str, &str)]) -> Self {
        let values = entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Self {
            values: Mutex::new(values),
        }
    }
}

impl ClientStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AuthError> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// File
// ---------------------------------------------------------------------------

/// JSON object file, written with owner-only permissions.
///
/// Every read goes to disk so that several processes sharing the file see
/// each other's logins and logouts. Writes are serialised within the
/// process.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Storage at the configured location (default `~/.quill/storage.json`).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NoStorageLocation`] if no home directory exists.
    pub fn from_config(config: &ClientConfig) -> Result<Self, AuthError> {
        config
            .storage_file()
            .map(Self::new)
            .ok_or(AuthError::NoStorageLocation)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, AuthError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            }
            Err(error) => return Err(self.storage_error(format!("read: {error}"))),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|source| AuthError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Read for modification. A corrupt file is replaced rather than
    /// blocking every later login.
    fn read_map_for_write(&self) -> Result<BTreeMap<String, String>, AuthError> {
        match self.read_map() {
            Err(AuthError::Corrupt { path, source }) => {
                tracing::warn!(error = %source, path = %path.display(), "client storage corrupt; starting fresh");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn write_map(&self, values: &BTreeMap<String, String>) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|e| self.storage_error(format!("mkdir {}: {e}", parent.display())))?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(error) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!(%error, dir = %parent.display(), "failed to chmod 0700");
                }
            }
        }

        let json = serde_json::to_string_pretty(values)
            .map_err(|e| self.storage_error(format!("serialize: {e}")))?;
        fs::write(&self.path, json).map_err(|e| self.storage_error(format!("write: {e}")))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                .map_err(|e| self.storage_error(format!("chmod: {e}")))?;
        }
        Ok(())
    }

    fn update(
        &self,
        change: impl FnOnce(&mut BTreeMap<String, String>) -> bool,
    ) -> Result<(), AuthError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut values = self.read_map_for_write()?;
        if change(&mut values) {
            self.write_map(&values)?;
        }
        Ok(())
    }

    fn storage_error(&self, reason: String) -> AuthError {
        AuthError::Storage {
            path: self.path.clone(),
            reason,
        }
    }
}

impl ClientStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.read_map() {
            Ok(mut values) => values.remove(key),
            Err(error) => {
                tracing::warn!(%error, key, "client storage unreadable");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        self.update(|values| {
            values.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), AuthError> {
        self.update(|values| values.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn token_helpers_round_trip_through_memory() {
        let storage = MemoryStorage::new();
        assert_eq!(load_token(&storage), None);
        store_token(&storage, "tok-1").unwrap();
        assert_eq!(load_token(&storage).as_deref(), Some("tok-1"));
        clear_token(&storage).unwrap();
        assert_eq!(load_token(&storage), None);
    }

    #[test]
    fn blank_token_counts_as_absent() {
        let storage = MemoryStorage::with(&[(TOKEN_KEY, "  ")]);
        assert_eq!(load_token(&storage), None);
    }

    #[test]
    fn persisted_flag_overrides_config() {
        let config = ClientConfig {
            mock_mode: false,
            ..ClientConfig::default()
        };
        let storage = MemoryStorage::new();
        assert!(!resolve_mock_mode(&storage, &config));

        set_mock_mode(&storage, true).unwrap();
        assert!(resolve_mock_mode(&storage, &config));

        let storage = MemoryStorage::with(&[(MOCK_MODE_KEY, "maybe")]);
        assert_eq!(mock_mode(&storage), None);
    }

    #[test]
    fn file_storage_survives_reopen() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("nested").join("storage.json");

        let storage = FileStorage::new(&path);
        store_token(&storage, "abc123").unwrap();
        set_mock_mode(&storage, false).unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(load_token(&reopened).as_deref(), Some("abc123"));
        assert_eq!(mock_mode(&reopened), Some(false));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
            assert_eq!(mode, 0o600, "storage file should be 0600");
        }
    }

    #[test]
    fn corrupt_file_reads_as_empty_and_is_replaced_on_write() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();

        let storage = FileStorage::new(&path);
        assert_eq!(load_token(&storage), None);
        store_token(&storage, "fresh").unwrap();
        assert_eq!(load_token(&storage).as_deref(), Some("fresh"));
    }

    #[test]
    fn removing_missing_key_does_not_create_file() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("storage.json");
        let storage = FileStorage::new(&path);
        clear_token(&storage).unwrap();
        assert!(!path.exists());
    }
}
