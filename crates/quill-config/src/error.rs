use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or `QUILL_*` variable could not be parsed.
    #[error("invalid quill configuration: {0}")]
    Figment(#[from] figment::Error),

    /// The selected backend needs a section that was left empty.
    #[error("[{section}] must be set to use the REST backend")]
    NotConfigured { section: String },

    #[error("{field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
