use quill_core::requests::{EnhanceRequest, GenerateRequest, NewContent, SeoRequest};
use quill_sync::App;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ContentCommands;
use crate::commands::data;
use crate::output::output;

#[derive(Serialize)]
struct TextResponse {
    content: String,
}

/// Handle `quill content <subcommand>`.
pub async fn handle(action: ContentCommands, app: &App, flags: GlobalFlags) -> anyhow::Result<()> {
    let hooks = app.contents();
    match action {
        ContentCommands::List => output(&*data(hooks.list().run().await)?, flags.format),
        ContentCommands::Get { id } => {
            output(&*data(hooks.detail(Some(id.as_str())).run().await)?, flags.format)
        }
        ContentCommands::Create(args) => {
            if args.title.trim().is_empty() {
                anyhow::bail!("content title is required");
            }
            let content = NewContent {
                title: args.title,
                body: args.body,
                platform: args.platform,
                keywords: args.keywords,
            };
            output(&hooks.create().mutate(content).await?, flags.format)
        }
        ContentCommands::Delete { id } => {
            hooks.delete().mutate(id.clone()).await?;
            output(&serde_json::json!({ "deleted": id }), flags.format)
        }
        ContentCommands::Generate {
            prompt,
            platform,
            keywords,
        } => {
            let content = hooks
                .generate()
                .mutate(GenerateRequest {
                    prompt,
                    platform,
                    keywords,
                })
                .await?;
            output(&TextResponse { content }, flags.format)
        }
        ContentCommands::Enhance { content, goal } => {
            let content = hooks
                .enhance()
                .mutate(EnhanceRequest { content, goal })
                .await?;
            output(&TextResponse { content }, flags.format)
        }
        ContentCommands::Seo { content, keywords } => {
            let report = hooks
                .analyze_seo()
                .mutate(SeoRequest { content, keywords })
                .await?;
            output(&report, flags.format)
        }
    }
}
