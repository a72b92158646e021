mod ai;
mod cli;
mod config;
mod diff;
mod github;
mod matcher;
mod orchestrator;
mod report;
mod rule;
mod types;

use clap::Parser;
use cli::{Cli, Commands};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log_level))
        .init();

    match &cli.command {
        Commands::Review(args) => match orchestrator::run(args).await {
            Ok(outcome) => std::process::exit(outcome.exit_code()),
            Err(e) => {
                error!("{:#}", e);
                std::process::exit(1);
            }
        },
    }
}
