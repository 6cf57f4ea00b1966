use quill_auth::SessionState;
use quill_core::entities::User;
use quill_core::validation::LoginForm;
use quill_sync::App;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    state: &'static str,
    user: Option<User>,
    backend: &'static str,
    token_stored: bool,
}

impl AuthStatusResponse {
    fn new(state: &SessionState, app: &App) -> Self {
        Self {
            state: state.as_str(),
            user: state.user().cloned(),
            backend: app.api().backend_name(),
            token_stored: app.auth().token().is_some(),
        }
    }
}

/// Handle `quill auth <subcommand>`.
pub async fn handle(action: &AuthCommands, app: &App, flags: GlobalFlags) -> anyhow::Result<()> {
    let auth = app.auth();
    match action {
        AuthCommands::Login(args) => {
            let form = LoginForm {
                username: args.username.clone(),
                password: args.password.clone(),
            };
            auth.login(&form).await?;
            output(&AuthStatusResponse::new(&auth.state(), app), flags.format)
        }
        AuthCommands::Logout => {
            auth.logout().await?;
            output(&AuthStatusResponse::new(&auth.state(), app), flags.format)
        }
        AuthCommands::Status => {
            let state = auth.initialize().await;
            output(&AuthStatusResponse::new(&state, app), flags.format)
        }
    }
}
