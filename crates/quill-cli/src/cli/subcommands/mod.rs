mod analytics;
mod auth;
mod content;
mod mode;
mod project;
mod settings;
mod template;

pub use ab_test::{AbTestCommands, AbTestCreateArgs, AbTestRecordArgs};
pub use analytics::AnalyticsCommands;
pub use auth::{AuthCommands, AuthLoginArgs};
pub use content::{ContentCommands, ContentCreateArgs};
pub use mode::{BackendKind, ModeCommands};
pub use project::{ProjectCommands, ProjectCreateArgs, ProjectUpdateArgs};
pub use settings::{AccountArgs, AppearanceArgs, PasswordArgs, SettingsCommands};
pub use template::{TemplateCommands, TemplateCreateArgs};
