//! Docker daemon image inspection
//!
//! Fetches an image's inspect record from the local daemon and converts it
//! into [`ImageMetadata`]. Everything downstream works on the metadata
//! struct and never talks to the daemon itself.

use bollard::Docker;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

use super::ImageMetadata;

/// Failures while talking to the Docker daemon.
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("failed to connect to the Docker daemon: {0}")]
    Connection(#[source] bollard::errors::Error),

    #[error("image not found: {name}")]
    NotFound { name: String },

    #[error("daemon request failed: {0}")]
    Daemon(#[source] bollard::errors::Error),
}

/// Inspects `name` (ID or repo:tag) via the local Docker daemon.
pub async fn inspect_image(name: &str) -> Result<ImageMetadata, InspectError> {
    let docker = Docker::connect_with_local_defaults().map_err(InspectError::Connection)?;
    inspect_with(&docker, name).await
}

/// Same as [`inspect_image`] with an injected client.
pub async fn inspect_with(docker: &Docker, name: &str) -> Result<ImageMetadata, InspectError> {
    let inspect = docker.inspect_image(name).await.map_err(|e| match e {
        bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        } => InspectError::NotFound {
            name: name.to_string(),
        },
        other => InspectError::Daemon(other),
    })?;

    let config = inspect.config.unwrap_or_default();

    let metadata = ImageMetadata {
        repo_tags: inspect.repo_tags.unwrap_or_default(),
        env: config.env.unwrap_or_default(),
        cmd: config.cmd.unwrap_or_default(),
        entrypoint: config.entrypoint.unwrap_or_default(),
        working_dir: config.working_dir.unwrap_or_default(),
        user: config.user.unwrap_or_default(),
        exposed_ports: config
            .exposed_ports
            .map(|ports| ports.into_keys().collect())
            .unwrap_or_default(),
        labels: config
            .labels
            .map(|labels| labels.into_iter().collect::<BTreeMap<_, _>>())
            .unwrap_or_default(),
        size_bytes: inspect.size.unwrap_or_default(),
        layers: inspect
            .root_fs
            .and_then(|fs| fs.layers)
            .map(|layers| layers.len())
            .unwrap_or_default(),
        os: inspect.os.unwrap_or_default(),
        architecture: inspect.architecture.unwrap_or_default(),
        created: inspect.created.unwrap_or_default(),
        author: inspect.author.unwrap_or_default(),
    };

    debug!(
        image = name,
        size = metadata.size_bytes,
        layers = metadata.layers,
        "image inspected"
    );

    Ok(metadata)
}
