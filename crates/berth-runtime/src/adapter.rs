//! Runtime client abstraction.
//!
//! The engine and the server talk to the container runtime exclusively
//! through [`ContainerRuntime`], so tests can substitute a stub and a
//! different runtime client can be dropped in behind the same seam.

use async_trait::async_trait;
use berth_common::error::Result;
use serde::{Deserialize, Serialize};

/// A point-in-time view of one container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerView {
    /// Container name, without the leading `/` the Docker API reports.
    pub name: String,
    /// Runtime state string (`running`, `exited`, ...), treated as opaque.
    pub status: String,
    /// Host source path of the first bind mount, or the "No bind mount"
    /// sentinel.
    pub path: String,
}

/// Capability interface over the container runtime.
///
/// Failures are reported as errors, never panics; a missing container is
/// [`berth_common::error::BerthError::NotFound`] and every other runtime
/// failure is an opaque [`berth_common::error::BerthError::Runtime`]
/// carrying the runtime's message.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Looks up a single container by name.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no container with that name exists, or a
    /// runtime error if the lookup itself fails.
    async fn inspect(&self, name: &str) -> Result<ContainerView>;

    /// Starts a container by name.
    ///
    /// # Errors
    ///
    /// Returns a runtime error on any underlying failure.
    async fn start(&self, name: &str) -> Result<()>;

    /// Stops a container by name.
    ///
    /// # Errors
    ///
    /// Returns a runtime error on any underlying failure.
    async fn stop(&self, name: &str) -> Result<()>;

    /// Lists all containers, running or not.
    ///
    /// # Errors
    ///
    /// Returns a runtime error if the listing fails.
    async fn list_all(&self) -> Result<Vec<ContainerView>>;
}
