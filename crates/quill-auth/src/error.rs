use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated; run `quill auth login`")]
    NotAuthenticated,

    #[error("home directory not found; cannot locate client storage")]
    NoStorageLocation,

    #[error("client storage error at {path}: {reason}")]
    Storage { path: PathBuf, reason: String },

    #[error("client storage at {path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
