use clap::{Args, Subcommand};
use quill_core::enums::Theme;

#[derive(Clone, Debug, Subcommand)]
pub enum SettingsCommands {
    /// Show account and appearance settings.
    Show,
    Account(AccountArgs),
    Appearance(AppearanceArgs),
    Password(PasswordArgs),
}

#[derive(Clone, Debug, Args)]
pub struct AccountArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, default_value = "")]
    pub bio: String,
    #[arg(long, default_value = "")]
    pub company: String,
}

#[derive(Clone, Debug, Args)]
pub struct AppearanceArgs {
    #[arg(long)]
    pub theme: Option<Theme>,
    #[arg(long)]
    pub accent_color: Option<String>,
    #[arg(long)]
    pub compact_mode: Option<bool>,
    #[arg(long)]
    pub font_size: Option<u8>,
}

#[derive(Clone, Debug, Args)]
pub struct PasswordArgs {
    #[arg(long)]
    pub current: String,
    #[arg(long = "new")]
    pub new_password: String,
    #[arg(long)]
    pub confirm: String,
}
