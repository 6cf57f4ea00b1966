use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Exchange credentials for a token and store it.
    Login(AuthLoginArgs),
    /// Clear the stored token and the session.
    Logout,
    /// Verify the stored token and show the session.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    #[arg(long, short = 'u', default_value = "")]
    pub username: String,
    #[arg(long, short = 'p', default_value = "")]
    pub password: String,
}
