use clap::{Subcommand, ValueEnum};

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum BackendKind {
    /// In-memory backend with demo data.
    Mock,
    /// REST backend at the configured base URL.
    Live,
}

#[derive(Clone, Debug, Subcommand)]
pub enum ModeCommands {
    /// Show which backend the next command will use.
    Show,
    /// Persist the backend choice in client storage.
    Set { backend: BackendKind },
    /// Forget the persisted choice and follow configuration again.
    Reset,
}
