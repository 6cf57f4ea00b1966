use quill_core::requests::NewTemplate;
use quill_sync::App;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TemplateCommands;
use crate::commands::data;
use crate::output::output;

/// Handle `quill template <subcommand>`.
pub async fn handle(action: TemplateCommands, app: &App, flags: GlobalFlags) -> anyhow::Result<()> {
    let hooks = app.templates();
    match action {
        TemplateCommands::List { category } => {
            output(&*data(hooks.list(category).run().await)?, flags.format)
        }
        TemplateCommands::Get { id } => {
            output(&*data(hooks.detail(Some(id.as_str())).run().await)?, flags.format)
        }
        TemplateCommands::Create(args) => {
            if args.name.trim().is_empty() || args.content.trim().is_empty() {
                anyhow::bail!("template name and content are required");
            }
            let template = NewTemplate {
                name: args.name,
                description: args.description,
                content: args.content,
                category: args.category,
                platform: args.platform,
            };
            output(&hooks.create().mutate(template).await?, flags.format)
        }
        TemplateCommands::Delete { id } => {
            hooks.delete().mutate(id.clone()).await?;
            output(&serde_json::json!({ "deleted": id }), flags.format)
        }
    }
}
