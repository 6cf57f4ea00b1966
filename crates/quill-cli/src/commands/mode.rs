use quill_auth::ClientStorage;
use quill_auth::storage;
use quill_config::QuillConfig;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{BackendKind, ModeCommands};
use crate::output::output;

#[derive(Serialize)]
struct ModeResponse {
    backend: &'static str,
    /// `storage` when a persisted flag decides, `config` otherwise.
    source: &'static str,
    wordpress: Integration,
    ai: Integration,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Integration {
    Off,
    ReadOnly,
    Ready,
}

pub fn handle(
    action: &ModeCommands,
    config: &QuillConfig,
    storage: &dyn ClientStorage,
    flags: GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ModeCommands::Show => {}
        ModeCommands::Set { backend } => {
            storage::set_mock_mode(storage, *backend == BackendKind::Mock)?;
        }
        ModeCommands::Reset => storage.remove(storage::MOCK_MODE_KEY)?,
    }

    let mock = storage::resolve_mock_mode(storage, &config.client);
    let response = ModeResponse {
        backend: if mock { "mock" } else { "live" },
        source: if storage::mock_mode(storage).is_some() {
            "storage"
        } else {
            "config"
        },
        wordpress: if config.wordpress.can_publish() {
            Integration::Ready
        } else if config.wordpress.is_configured() {
            Integration::ReadOnly
        } else {
            Integration::Off
        },
        ai: if config.ai.is_configured() {
            Integration::Ready
        } else {
            Integration::Off
        },
    };
    output(&response, flags.format)
}
