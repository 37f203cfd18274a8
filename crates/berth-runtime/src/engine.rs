//! Group operations engine.
//!
//! Resolves a target (project, alias, or direct container name) through
//! the registry, then drives the requested action across every member
//! sequentially. Grouped actions are best-effort: one member failing
//! never aborts the rest, and each member's outcome is reported
//! independently.

use std::fmt;
use std::sync::Arc;

use berth_common::error::Result;
use berth_registry::Registry;
use serde::{Deserialize, Serialize};

use crate::adapter::ContainerRuntime;

/// The action applied to a resolved target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Start the container(s).
    Start,
    /// Stop the container(s).
    Stop,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Stop => write!(f, "stop"),
        }
    }
}

/// Outcome for one member of a group action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberOutcome {
    /// Container name the action was attempted on.
    pub container: String,
    /// Failure reason, absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MemberOutcome {
    /// Whether the action succeeded for this member.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregated result of a group action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupReport {
    /// The alias or project name the action was resolved from.
    pub target: String,
    /// The action that was applied.
    pub action: Action,
    /// Per-member outcomes, in member-list order.
    pub members: Vec<MemberOutcome>,
}

impl GroupReport {
    /// Whether every member succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.members.iter().all(MemberOutcome::succeeded)
    }
}

/// Orchestrates registry resolution and runtime calls.
pub struct Engine {
    registry: Arc<Registry>,
    runtime: Arc<dyn ContainerRuntime>,
}

impl Engine {
    /// Creates an engine over a registry and a runtime adapter.
    #[must_use]
    pub fn new(registry: Arc<Registry>, runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self { registry, runtime }
    }

    /// Applies an action to every member of a project.
    ///
    /// # Errors
    ///
    /// Returns `UnknownProject` if the project is not registered, or a
    /// storage error if the registry cannot be read. Per-member runtime
    /// failures are reported inside the returned [`GroupReport`], never
    /// as an `Err`.
    pub async fn run_project(&self, project: &str, action: Action) -> Result<GroupReport> {
        let members = self.registry.resolve_project(project)?;
        tracing::info!(project, %action, members = members.len(), "running project action");
        Ok(self.run_members(project, &members, action).await)
    }

    /// Applies an action to the single container an alias points at.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAlias` if the alias is not registered, or a
    /// storage error if the registry cannot be read. No runtime call is
    /// made when resolution fails.
    pub async fn run_alias(&self, alias: &str, action: Action) -> Result<GroupReport> {
        let container = self.registry.resolve_alias(alias)?;
        tracing::info!(alias, container = %container, %action, "running alias action");
        Ok(self.run_members(alias, &[container], action).await)
    }

    /// Applies an action directly to a container name, bypassing the
    /// registry.
    ///
    /// # Errors
    ///
    /// Surfaces the adapter error as-is: `NotFound` when the container
    /// does not exist, otherwise an opaque runtime error.
    pub async fn run_container(&self, name: &str, action: Action) -> Result<()> {
        self.apply(name, action).await
    }

    /// Runs the action across members sequentially, isolating failures.
    async fn run_members(&self, target: &str, members: &[String], action: Action) -> GroupReport {
        let mut outcomes = Vec::with_capacity(members.len());
        for name in members {
            let error = match self.apply(name, action).await {
                Ok(()) => None,
                Err(e) => {
                    tracing::warn!(target, container = %name, %action, error = %e, "member failed");
                    Some(e.to_string())
                }
            };
            outcomes.push(MemberOutcome {
                container: name.clone(),
                error,
            });
        }
        GroupReport {
            target: target.to_string(),
            action,
            members: outcomes,
        }
    }

    /// Looks the container up first, then applies the action, so a
    /// missing container reports `NotFound` rather than an opaque
    /// daemon message.
    async fn apply(&self, name: &str, action: Action) -> Result<()> {
        let _ = self.runtime.inspect(name).await?;
        match action {
            Action::Start => self.runtime.start(name).await,
            Action::Stop => self.runtime.stop(name).await,
        }
    }
}
