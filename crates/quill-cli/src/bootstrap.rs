use std::sync::Arc;

use anyhow::Context;
use quill_auth::{ClientStorage, FileStorage};
use quill_config::QuillConfig;
use quill_sync::App;

/// Layered config: defaults, user and project TOML, `.env`, `QUILL_*` env.
pub fn load_config() -> anyhow::Result<QuillConfig> {
    QuillConfig::load_with_dotenv().context("failed to load quill configuration")
}

pub fn open_storage(config: &QuillConfig) -> anyhow::Result<Arc<dyn ClientStorage>> {
    let storage = FileStorage::from_config(&config.client)
        .context("failed to resolve the client storage file")?;
    tracing::debug!(path = %storage.path().display(), "client storage");
    Ok(Arc::new(storage))
}

pub fn build_app(config: QuillConfig, storage: Arc<dyn ClientStorage>) -> anyhow::Result<App> {
    App::build(config, storage).context(
        "failed to start the client (set QUILL_API__BASE_URL or run `quill mode set mock`)",
    )
}
