use quill_core::requests::AppearanceUpdate;
use quill_core::validation::{AccountSettingsForm, PasswordForm};
use quill_sync::{App, forms};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SettingsCommands;
use crate::commands::data;
use crate::output::output;

#[derive(Serialize)]
struct SettingsResponse<A, B> {
    account: A,
    appearance: B,
}

/// Handle `quill settings <subcommand>`.
pub async fn handle(action: SettingsCommands, app: &App, flags: GlobalFlags) -> anyhow::Result<()> {
    let hooks = app.settings();
    match action {
        SettingsCommands::Show => {
            let (account, appearance) = (hooks.account(), hooks.appearance());
            let (account, appearance) = tokio::join!(account.run(), appearance.run());
            let (account, appearance) = (data(account)?, data(appearance)?);
            output(
                &SettingsResponse {
                    account: &*account,
                    appearance: &*appearance,
                },
                flags.format,
            )
        }
        SettingsCommands::Account(args) => {
            let form = AccountSettingsForm {
                name: args.name,
                email: args.email,
                bio: args.bio,
                company: args.company,
            };
            output(&forms::submit(&form, &hooks.update_account()).await?, flags.format)
        }
        SettingsCommands::Appearance(args) => {
            let update = AppearanceUpdate {
                theme: args.theme,
                accent_color: args.accent_color,
                compact_mode: args.compact_mode,
                font_size: args.font_size,
            };
            output(&hooks.update_appearance().mutate(update).await?, flags.format)
        }
        SettingsCommands::Password(args) => {
            let form = PasswordForm {
                current_password: args.current,
                new_password: args.new_password,
                confirm_password: args.confirm,
            };
            forms::submit(&form, &hooks.change_password()).await?;
            output(&serde_json::json!({ "changed": true }), flags.format)
        }
    }
}
