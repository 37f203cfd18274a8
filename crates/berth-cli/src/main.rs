//! # berth — group and drive Docker containers
//!
//! Thin control-plane over a local Docker daemon: group existing
//! containers into projects, alias individual containers, and start or
//! stop them from the terminal or the bundled web UI.

mod commands;
mod output;

use clap::Parser;

use crate::commands::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    commands::execute(cli).await
}
