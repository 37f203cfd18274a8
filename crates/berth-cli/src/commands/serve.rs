//! `berth serve` — Serve the web UI and JSON API.

use std::path::Path;
use std::sync::Arc;

use berth_registry::Registry;
use berth_runtime::{ContainerRuntime, DockerRuntime};
use berth_server::AppState;
use clap::Args;

/// Arguments for the `serve` command.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind the web UI and API to.
    #[arg(long, default_value = berth_common::constants::DEFAULT_LISTEN_ADDR)]
    pub addr: String,
}

/// Executes the `serve` command.
///
/// # Errors
///
/// Returns an error if the Docker client cannot be constructed, the
/// address cannot be bound, or the server fails.
pub async fn execute(args: ServeArgs, registry_file: &Path) -> anyhow::Result<()> {
    let registry = Arc::new(Registry::open(registry_file));
    let runtime: Arc<dyn ContainerRuntime> =
        Arc::new(DockerRuntime::connect().map_err(|e| anyhow::anyhow!("{e}"))?);
    let state = AppState::new(registry, runtime);

    eprintln!("Serving berth on http://{}", args.addr);
    berth_server::serve(&args.addr, state)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))
}
