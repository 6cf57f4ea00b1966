use quill_auth::GuardDecision;
use quill_sync::App;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RouteArgs;
use crate::output::output;

#[derive(Serialize)]
struct RouteResponse {
    path: String,
    session: &'static str,
    decision: &'static str,
    redirect: Option<String>,
}

/// Handle `quill route <path>`: settle the session once, then ask the guard.
pub async fn handle(args: &RouteArgs, app: &App, flags: GlobalFlags) -> anyhow::Result<()> {
    let state = app.auth().initialize().await;
    let decision = app.auth().guard(app.guard(), &args.path);
    let (decision, redirect) = match decision {
        GuardDecision::Placeholder => ("placeholder", None),
        GuardDecision::Redirect(target) => ("redirect", Some(target)),
        GuardDecision::Render => ("render", None),
    };
    output(
        &RouteResponse {
            path: args.path.clone(),
            session: state.as_str(),
            decision,
            redirect,
        },
        flags.format,
    )
}
