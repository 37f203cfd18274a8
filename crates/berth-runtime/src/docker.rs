//! Docker Engine API adapter built on bollard.

use async_trait::async_trait;
use berth_common::constants::NO_BIND_MOUNT;
use berth_common::error::{BerthError, Result};
use bollard::container::{ListContainersOptions, StopContainerOptions};
use bollard::models::{MountPoint, MountPointTypeEnum};

use crate::adapter::{ContainerRuntime, ContainerView};

/// Grace period passed to the stop call before the daemon kills the
/// container.
const STOP_TIMEOUT_SECS: i64 = 10;

/// [`ContainerRuntime`] implementation over a local Docker daemon.
#[derive(Debug, Clone)]
pub struct DockerRuntime {
    docker: bollard::Docker,
}

impl DockerRuntime {
    /// Connects using the platform defaults (`/var/run/docker.sock` on
    /// Unix, respecting `DOCKER_HOST` when set).
    ///
    /// # Errors
    ///
    /// Returns a runtime error if no connection can be established.
    pub fn connect() -> Result<Self> {
        let docker =
            bollard::Docker::connect_with_local_defaults().map_err(|e| BerthError::Runtime {
                message: e.to_string(),
            })?;
        Ok(Self { docker })
    }
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn inspect(&self, name: &str) -> Result<ContainerView> {
        let details = self
            .docker
            .inspect_container(name, None)
            .await
            .map_err(|e| map_docker_error(name, e))?;

        let status = details
            .state
            .as_ref()
            .and_then(|s| s.status.as_ref())
            .map_or_else(|| "unknown".to_string(), ToString::to_string);
        let path = details
            .mounts
            .as_deref()
            .map_or_else(|| NO_BIND_MOUNT.to_string(), first_bind_source);

        Ok(ContainerView {
            name: details
                .name
                .map_or_else(|| name.to_string(), |n| trim_name(&n)),
            status,
            path,
        })
    }

    async fn start(&self, name: &str) -> Result<()> {
        self.docker
            .start_container::<String>(name, None)
            .await
            .map_err(|e| map_docker_error(name, e))?;
        tracing::info!(name, "container started");
        Ok(())
    }

    async fn stop(&self, name: &str) -> Result<()> {
        self.docker
            .stop_container(name, Some(StopContainerOptions { t: STOP_TIMEOUT_SECS }))
            .await
            .map_err(|e| map_docker_error(name, e))?;
        tracing::info!(name, "container stopped");
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<ContainerView>> {
        let summaries = self
            .docker
            .list_containers(Some(ListContainersOptions::<String> {
                all: true,
                ..Default::default()
            }))
            .await
            .map_err(|e| BerthError::Runtime {
                message: e.to_string(),
            })?;

        Ok(summaries
            .into_iter()
            .map(|summary| ContainerView {
                name: summary
                    .names
                    .as_ref()
                    .and_then(|names| names.first())
                    .map_or_else(String::new, |n| trim_name(n)),
                status: summary.state.unwrap_or_else(|| "unknown".to_string()),
                path: summary
                    .mounts
                    .as_deref()
                    .map_or_else(|| NO_BIND_MOUNT.to_string(), first_bind_source),
            })
            .collect())
    }
}

/// The Docker API reports names with a leading slash (`/nginx`).
fn trim_name(name: &str) -> String {
    name.trim_start_matches('/').to_string()
}

/// Returns the source of the first bind-type mount in the order the
/// runtime reported them, or the sentinel when none exists.
fn first_bind_source(mounts: &[MountPoint]) -> String {
    mounts
        .iter()
        .find(|m| matches!(m.typ, Some(MountPointTypeEnum::BIND)))
        .and_then(|m| m.source.clone())
        .unwrap_or_else(|| NO_BIND_MOUNT.to_string())
}

/// Maps a bollard error to the workspace taxonomy: a 404 from the daemon
/// means the container does not exist, everything else stays opaque.
fn map_docker_error(name: &str, err: bollard::errors::Error) -> BerthError {
    match err {
        bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        } => BerthError::NotFound {
            container: name.to_string(),
        },
        other => BerthError::Runtime {
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mount(typ: MountPointTypeEnum, source: &str) -> MountPoint {
        MountPoint {
            typ: Some(typ),
            source: Some(source.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn first_bind_source_skips_volume_mounts() {
        let mounts = vec![
            mount(MountPointTypeEnum::VOLUME, "/var/lib/docker/volumes/x"),
            mount(MountPointTypeEnum::BIND, "/srv/app"),
        ];
        assert_eq!(first_bind_source(&mounts), "/srv/app");
    }

    #[test]
    fn first_bind_source_takes_first_of_several_binds() {
        let mounts = vec![
            mount(MountPointTypeEnum::BIND, "/srv/app"),
            mount(MountPointTypeEnum::BIND, "/srv/other"),
        ];
        assert_eq!(first_bind_source(&mounts), "/srv/app");
    }

    #[test]
    fn first_bind_source_without_binds_is_sentinel() {
        let mounts = vec![mount(MountPointTypeEnum::VOLUME, "/var/lib/docker/volumes/x")];
        assert_eq!(first_bind_source(&mounts), NO_BIND_MOUNT);
        assert_eq!(first_bind_source(&[]), NO_BIND_MOUNT);
    }

    #[test]
    fn trim_name_strips_leading_slash() {
        assert_eq!(trim_name("/nginx"), "nginx");
        assert_eq!(trim_name("nginx"), "nginx");
    }

    #[test]
    fn docker_404_maps_to_not_found() {
        let err = bollard::errors::Error::DockerResponseServerError {
            status_code: 404,
            message: "No such container: ghost".to_string(),
        };
        assert!(matches!(
            map_docker_error("ghost", err),
            BerthError::NotFound { container } if container == "ghost"
        ));
    }

    #[test]
    fn other_docker_errors_stay_opaque() {
        let err = bollard::errors::Error::DockerResponseServerError {
            status_code: 500,
            message: "boom".to_string(),
        };
        assert!(matches!(
            map_docker_error("c", err),
            BerthError::Runtime { message } if message.contains("boom")
        ));
    }
}
