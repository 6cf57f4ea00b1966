use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("quill error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;
    let flags = cli.global_flags();

    let config = bootstrap::load_config()?;
    let storage = bootstrap::open_storage(&config)?;

    // Switching backends must work even when the current one is unusable.
    if let cli::Commands::Mode { action } = &cli.command {
        return commands::mode::handle(action, &config, storage.as_ref(), flags);
    }

    let app = bootstrap::build_app(config, storage)?;
    let mut events = app.client().subscribe();

    let result = commands::dispatch::dispatch(cli.command, &app, flags).await;
    commands::notify::drain(&mut events, flags);
    result
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("QUILL_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
