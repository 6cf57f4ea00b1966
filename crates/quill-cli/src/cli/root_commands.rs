use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    AbTestCommands, AnalyticsCommands, AuthCommands, ContentCommands, ModeCommands,
    ProjectCommands, SettingsCommands, TemplateCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Log in, log out, and inspect the session.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Switch between the REST backend and the in-memory mock.
    Mode {
        #[command(subcommand)]
        action: ModeCommands,
    },
    /// A/B tests and their lifecycle.
    AbTest {
        #[command(subcommand)]
        action: AbTestCommands,
    },
    /// Saved projects.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Content templates.
    Template {
        #[command(subcommand)]
        action: TemplateCommands,
    },
    /// Contents and the editor actions.
    Content {
        #[command(subcommand)]
        action: ContentCommands,
    },
    /// Performance analytics.
    Analytics {
        #[command(subcommand)]
        action: AnalyticsCommands,
    },
    /// Account and appearance settings.
    Settings {
        #[command(subcommand)]
        action: SettingsCommands,
    },
    /// Evaluate the route guard for a path against the current session.
    Route(RouteArgs),
}

impl Commands {
    /// Dashboard route a command stands in for. Commands without one are
    /// not gated on the session.
    #[must_use]
    pub const fn screen_path(&self) -> Option<&'static str> {
        match self {
            Self::AbTest { .. } => Some("/ab-testing"),
            Self::Project { .. } => Some("/projects"),
            Self::Template { .. } => Some("/templates"),
            Self::Content { .. } => Some("/content"),
            Self::Analytics { .. } => Some("/analytics"),
            Self::Settings { .. } => Some("/settings"),
            Self::Auth { .. } | Self::Mode { .. } | Self::Route(_) => None,
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct RouteArgs {
    /// Dashboard path, e.g. `/ab-testing`.
    pub path: String,
}
