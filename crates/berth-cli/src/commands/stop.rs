//! `berth stop` — Stop every container of a project.

use std::path::Path;
use std::sync::Arc;

use berth_registry::Registry;
use berth_runtime::{Action, DockerRuntime, Engine};
use clap::Args;

use crate::output;

/// Arguments for the `stop` command.
#[derive(Args, Debug)]
pub struct StopArgs {
    /// Project whose members are stopped.
    pub project: String,
}

/// Executes the `stop` command.
///
/// # Errors
///
/// Returns an error if the project is unknown, the registry cannot be
/// read, or the Docker client cannot be constructed.
pub async fn execute(args: StopArgs, registry_file: &Path) -> anyhow::Result<()> {
    let registry = Arc::new(Registry::open(registry_file));
    let runtime = Arc::new(DockerRuntime::connect().map_err(|e| anyhow::anyhow!("{e}"))?);
    let engine = Engine::new(registry, runtime);

    let report = engine
        .run_project(&args.project, Action::Stop)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    output::print_report(&report);
    Ok(())
}
