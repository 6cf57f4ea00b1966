use anyhow::Context;
use quill_core::requests::NewVariant;
use quill_core::validation::AbTestForm;
use quill_sync::hooks::MetricInput;
use quill_sync::{App, forms};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{AbTestCommands, AbTestCreateArgs};
use crate::commands::data;
use crate::output::output;

/// Handle `quill ab-test <subcommand>`.
pub async fn handle(action: AbTestCommands, app: &App, flags: GlobalFlags) -> anyhow::Result<()> {
    let hooks = app.ab_tests();
    match action {
        AbTestCommands::List => output(&*data(hooks.list().run().await)?, flags.format),
        AbTestCommands::Get { id } => {
            output(&*data(hooks.detail(Some(id.as_str())).run().await)?, flags.format)
        }
        AbTestCommands::Create(args) => {
            let form = create_form(args)?;
            let created = forms::submit(&form, &hooks.create()).await?;
            output(&created, flags.format)
        }
        AbTestCommands::Start { id } => output(&hooks.start().mutate(id).await?, flags.format),
        AbTestCommands::Complete { id } => {
            output(&hooks.complete().mutate(id).await?, flags.format)
        }
        AbTestCommands::Record(args) => {
            let updated = hooks
                .record_metric()
                .mutate(MetricInput {
                    test_id: args.id,
                    variant_id: args.variant,
                    metric: args.metric,
                })
                .await?;
            output(&updated, flags.format)
        }
        AbTestCommands::Delete { id } => {
            hooks.delete().mutate(id.clone()).await?;
            output(&serde_json::json!({ "deleted": id }), flags.format)
        }
    }
}

fn create_form(args: AbTestCreateArgs) -> anyhow::Result<AbTestForm> {
    let variants = args
        .variants
        .iter()
        .map(|raw| {
            let (name, content) = raw
                .split_once('=')
                .with_context(|| format!("invalid variant '{raw}': expected NAME=CONTENT"))?;
            Ok(NewVariant {
                name: name.trim().to_string(),
                content: content.trim().to_string(),
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(AbTestForm {
        title: args.title,
        description: args.description,
        content: args.content,
        variants,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(variants: &[&str]) -> AbTestCreateArgs {
        AbTestCreateArgs {
            title: "Spring Sale".into(),
            description: "Seasonal discount headline".into(),
            content: "Save 20% on every plan this spring".into(),
            variants: variants.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn variants_split_on_first_equals() {
        let form = create_form(args(&["Control=Save 20%", "B = Save = more"])).unwrap();
        assert_eq!(form.variants[1].name, "B");
        assert_eq!(form.variants[1].content, "Save = more");
    }

    #[test]
    fn variant_without_separator_is_rejected() {
        let err = create_form(args(&["Control"])).unwrap_err();
        assert!(err.to_string().contains("expected NAME=CONTENT"));
    }
}
