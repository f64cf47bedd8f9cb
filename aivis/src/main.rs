// aivis/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn init_tracing(verbose: bool) {
    // RUST_LOG=aivis_core=debug aivis score ... pour voir chaque règle
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Score {
            input,
            llm,
            format,
            output,
        } => commands::score::execute(&cli.config_dir, input, llm, format, output).await,
        Commands::Site {
            input,
            format,
            output,
        } => commands::site::execute(&cli.config_dir, input, format, output).await,
        Commands::Rules { dimension } => commands::rules::execute(&cli.config_dir, dimension),
        Commands::Check => commands::check::execute(&cli.config_dir),
    }
}
