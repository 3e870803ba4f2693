//! Amani smoke CLI
//!
//! Command-line smoke tooling for the Amani portal membership API:
//! registration, approval polling, login, and profile fetch against a live
//! deployment.

mod commands;
mod config;
mod identity;
mod output;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "amani")]
#[command(about = "Amani portal API smoke tooling", long_about = None)]
struct Cli {
    /// Portal API base URL
    #[arg(
        long,
        env = "AMANI_API_URL",
        default_value = "http://127.0.0.1:5000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Poll progress is emitted by amani-client via tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "amani_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    handle_command(cli.command, &cli.api_url).await
}
