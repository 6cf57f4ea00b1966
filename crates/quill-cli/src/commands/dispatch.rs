use anyhow::bail;
use quill_auth::GuardDecision;
use quill_sync::App;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
///
/// Screen commands settle the session and pass the route guard first, so a
/// refused screen never reaches the backend.
pub async fn dispatch(command: Commands, app: &App, flags: GlobalFlags) -> anyhow::Result<()> {
    if let Some(path) = command.screen_path() {
        authorize(app, path).await?;
    }

    match command {
        Commands::Auth { action } => commands::auth::handle(&action, app, flags).await,
        Commands::AbTest { action } => commands::ab_test::handle(action, app, flags).await,
        Commands::Project { action } => commands::project::handle(action, app, flags).await,
        Commands::Template { action } => commands::template::handle(action, app, flags).await,
        Commands::Content { action } => commands::content::handle(action, app, flags).await,
        Commands::Analytics { action } => commands::analytics::handle(&action, app, flags).await,
        Commands::Settings { action } => commands::settings::handle(action, app, flags).await,
        Commands::Route(args) => commands::route::handle(&args, app, flags).await,
        Commands::Mode { action } => {
            commands::mode::handle(&action, app.config(), app.storage(), flags)
        }
    }
}

async fn authorize(app: &App, path: &str) -> anyhow::Result<()> {
    let state = app.auth().initialize().await;
    match app.auth().guard(app.guard(), path) {
        GuardDecision::Render => Ok(()),
        GuardDecision::Redirect(target) => {
            tracing::debug!(path, %target, session = state.as_str(), "screen refused");
            bail!("{path} needs a session (redirected to {target}); run `quill auth login` first")
        }
        GuardDecision::Placeholder => bail!("{path}: session is still loading"),
    }
}
