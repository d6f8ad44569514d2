use anyhow::Context;
use clap::Parser;
use gomock_config::GomockConfig;

mod cli;
mod commands;

fn main() {
    if let Err(error) = run() {
        eprintln!("gomock error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let request = cli.request();
    let settings = || -> anyhow::Result<cli::Settings> {
        let config = GomockConfig::load().context("failed to load gomock configuration")?;
        Ok(cli.settings(&config))
    };
    commands::execute(
        request.as_ref(),
        settings,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("GOMOCK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
