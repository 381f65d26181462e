mod cli;
mod serve;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port, model, allowed_origins, expose_errors } => {
            serve::run(serve::ServeOptions { host, port, model, allowed_origins, expose_errors })
                .await
        }
    }
}
