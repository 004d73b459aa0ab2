use clap::Parser;
use park_core::errors::ParkingError;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod shell;
mod ui;

/// Exit status for a request the facility refused (full, unknown plate, ...).
const EXIT_REFUSED: i32 = 2;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        if let Some(refusal) = error.downcast_ref::<ParkingError>() {
            eprintln!("parkit: {refusal}");
            std::process::exit(EXIT_REFUSED);
        }
        eprintln!("parkit error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    let config = bootstrap::load_config()?;
    let ctx = context::AppContext::init(&config, &flags).await?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("PARKIT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
