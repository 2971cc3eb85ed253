//! Image metadata record and derived display values
//!
//! [`ImageMetadata`] is the crate's own view of a `docker inspect` response.
//! It is produced once per invocation (by [`inspect`] or by tests) and read
//! by every analysis pass; nothing here talks to the daemon.

pub mod compare;
pub mod inspect;
pub mod report;

pub use compare::ImageComparison;
pub use inspect::InspectError;
pub use report::ImageReport;

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use crate::detection::version::Tier;

/// Immutable snapshot of an image's configuration and stats.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageMetadata {
    /// Repository tags (e.g. `myapp:1.2`)
    #[serde(default)]
    pub repo_tags: Vec<String>,
    /// Environment variables as `KEY=VALUE` strings, in image order
    #[serde(default)]
    pub env: Vec<String>,
    /// Default command tokens
    #[serde(default)]
    pub cmd: Vec<String>,
    /// Entrypoint tokens
    #[serde(default)]
    pub entrypoint: Vec<String>,
    /// Working directory
    #[serde(default)]
    pub working_dir: String,
    /// Configured user (empty means root)
    #[serde(default)]
    pub user: String,
    /// Exposed ports (e.g. `8080/tcp`)
    #[serde(default)]
    pub exposed_ports: Vec<String>,
    /// Image labels
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    /// Total size in bytes
    #[serde(default)]
    pub size_bytes: i64,
    /// Number of filesystem layers
    #[serde(default)]
    pub layers: usize,
    /// Operating system
    #[serde(default)]
    pub os: String,
    /// CPU architecture
    #[serde(default)]
    pub architecture: String,
    /// Creation timestamp (RFC 3339)
    #[serde(default)]
    pub created: String,
    /// Image author
    #[serde(default)]
    pub author: String,
}

impl ImageMetadata {
    /// Image size in decimal megabytes (bytes / 10^6).
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / 1_000_000.0
    }

    /// Human-readable size: two decimals, MB below 1000 MB, GB above.
    pub fn size_string(&self) -> String {
        let size_mb = self.size_mb();
        if size_mb > 1000.0 {
            format!("{:.2} GB", size_mb / 1000.0)
        } else {
            format!("{:.2} MB", size_mb)
        }
    }

    /// Size health bucket: under 250 MB is fine, up to 500 MB is a warning.
    pub fn size_tier(&self) -> Tier {
        let size_mb = self.size_mb();
        if size_mb < 250.0 {
            Tier::Success
        } else if size_mb <= 500.0 {
            Tier::Warning
        } else {
            Tier::Error
        }
    }

    /// Layer-count health bucket: under 10 is fine, up to 20 is a warning.
    pub fn layer_tier(&self) -> Tier {
        if self.layers < 10 {
            Tier::Success
        } else if self.layers <= 20 {
            Tier::Warning
        } else {
            Tier::Error
        }
    }

    /// Creation date formatted as `02 Jan 2006`, or empty when unparsable.
    pub fn formatted_created(&self) -> String {
        match DateTime::parse_from_rfc3339(&self.created) {
            Ok(parsed) => parsed.format("%d %b %Y").to_string(),
            Err(e) => {
                warn!(created = %self.created, error = %e, "failed to parse image creation date");
                String::new()
            }
        }
    }

    /// Author field with a `<none>` placeholder for unset values.
    pub fn author_display(&self) -> &str {
        if self.author.is_empty() {
            "<none>"
        } else {
            &self.author
        }
    }
}
