use quill_sync::App;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AnalyticsCommands;
use crate::commands::data;
use crate::output::output;

/// Handle `quill analytics <subcommand>`.
pub async fn handle(
    action: &AnalyticsCommands,
    app: &App,
    flags: GlobalFlags,
) -> anyhow::Result<()> {
    let hooks = app.analytics();
    match *action {
        AnalyticsCommands::Performance { range } => {
            output(&*data(hooks.performance(range).run().await)?, flags.format)
        }
        AnalyticsCommands::Overview { range } => {
            output(&*data(hooks.overview(range).run().await)?, flags.format)
        }
    }
}
