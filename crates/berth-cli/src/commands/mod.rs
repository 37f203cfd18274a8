//! CLI command definitions and dispatch.

pub mod serve;
pub mod setup;
pub mod start;
pub mod stop;

use std::path::PathBuf;

use berth_common::config::BerthConfig;
use clap::{Parser, Subcommand};

/// berth — group and drive Docker containers.
#[derive(Parser, Debug)]
#[command(name = "berth", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute. Without one, the web UI is served.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the registry file.
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start every container of a project.
    Start(start::StartArgs),
    /// Stop every container of a project.
    Stop(stop::StopArgs),
    /// Serve the web UI and JSON API.
    Serve(serve::ServeArgs),
    /// Install `bth`/`bth-stop` aliases into shell profiles.
    SetupShell(setup::SetupArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    let mut config = BerthConfig::default();
    if let Some(path) = cli.data_file {
        config.registry_file = path;
    }

    match cli.command {
        Some(Command::Start(args)) => start::execute(args, &config.registry_file).await,
        Some(Command::Stop(args)) => stop::execute(args, &config.registry_file).await,
        Some(Command::Serve(args)) => serve::execute(args, &config.registry_file).await,
        Some(Command::SetupShell(args)) => setup::execute(&args),
        None => {
            let args = serve::ServeArgs {
                addr: config.listen_addr.clone(),
            };
            serve::execute(args, &config.registry_file).await
        }
    }
}
