use quill_core::requests::SavedProjectUpdate;
use quill_core::validation::SavedProjectForm;
use quill_sync::{App, forms};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectCommands;
use crate::commands::data;
use crate::output::output;

/// Handle `quill project <subcommand>`.
pub async fn handle(action: ProjectCommands, app: &App, flags: GlobalFlags) -> anyhow::Result<()> {
    let hooks = app.saved_projects();
    match action {
        ProjectCommands::List { status } => {
            output(&*data(hooks.list(status).run().await)?, flags.format)
        }
        ProjectCommands::Get { id } => {
            output(&*data(hooks.detail(Some(id.as_str())).run().await)?, flags.format)
        }
        ProjectCommands::Create(args) => {
            let form = SavedProjectForm {
                title: args.title,
                content: args.content,
                status: args.status,
                platform: args.platform,
                keywords: args.keywords,
            };
            output(&forms::submit(&form, &hooks.create()).await?, flags.format)
        }
        ProjectCommands::Update(args) => {
            let update = SavedProjectUpdate {
                title: args.title,
                content: args.content,
                status: args.status,
                platform: args.platform,
                keywords: args.keywords,
            };
            output(&hooks.update().mutate((args.id, update)).await?, flags.format)
        }
        ProjectCommands::Delete { id } => {
            hooks.delete().mutate(id.clone()).await?;
            output(&serde_json::json!({ "deleted": id }), flags.format)
        }
    }
}
