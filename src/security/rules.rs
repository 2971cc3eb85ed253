//! The individual CIS benchmark rules
//!
//! Each rule is stateless (CIS-5.2 carries only its base directory) and
//! inspects the full Dockerfile text independently of the others.

use std::path::PathBuf;

use super::{CisResult, CisRule, Severity};

/// Image reference from the first FROM instruction, if any.
fn first_from_image(dockerfile: &str) -> Option<&str> {
    dockerfile
        .lines()
        .map(str::trim)
        .find(|line| line.to_lowercase().starts_with("from"))
        .and_then(|line| line.split_whitespace().nth(1))
}

fn count_lines_with_prefix(dockerfile: &str, prefix: &str) -> usize {
    dockerfile
        .lines()
        .filter(|line| line.trim().to_lowercase().starts_with(prefix))
        .count()
}

/// CIS-1.1: base image should come from the official library.
pub struct OfficialBaseImageRule;

impl CisRule for OfficialBaseImageRule {
    fn check(&self, dockerfile: &str) -> CisResult {
        const ID: &str = "CIS-1.1";
        const DESC: &str = "Use official base images";

        let Some(image) = first_from_image(dockerfile) else {
            return CisResult::fail(ID, DESC, Severity::High, "No FROM instruction");
        };

        if image.contains('/') && !image.starts_with("library/") {
            return CisResult::fail(
                ID,
                DESC,
                Severity::Medium,
                "Base image is not from the official library namespace",
            );
        }
        CisResult::pass(ID, DESC)
    }
}

/// CIS-1.2: base image must carry an explicit, non-latest tag.
pub struct ExplicitTagRule;

impl CisRule for ExplicitTagRule {
    fn check(&self, dockerfile: &str) -> CisResult {
        const ID: &str = "CIS-1.2";
        const DESC: &str = "Use explicit image tags";

        match first_from_image(dockerfile) {
            Some(image) if image.contains(':') && !image.ends_with(":latest") => {
                CisResult::pass(ID, DESC)
            }
            _ => CisResult::fail(
                ID,
                DESC,
                Severity::High,
                "Base image tag is missing or latest",
            ),
        }
    }
}

/// CIS-4.1: container should not run as root.
pub struct NoRootUserRule;

impl CisRule for NoRootUserRule {
    fn check(&self, dockerfile: &str) -> CisResult {
        const ID: &str = "CIS-4.1";
        const DESC: &str = "Container should not run as root";

        if !dockerfile.to_lowercase().contains("user") {
            return CisResult::fail(ID, DESC, Severity::High, "Missing USER instruction");
        }
        CisResult::pass(ID, DESC)
    }
}

/// CIS-5.1: package manager caches must be cleaned up.
pub struct CleanCacheRule;

impl CisRule for CleanCacheRule {
    fn check(&self, dockerfile: &str) -> CisResult {
        const ID: &str = "CIS-5.1";
        const DESC: &str = "Clean package manager cache";

        let lower = dockerfile.to_lowercase();
        let cleaned = lower.contains("apt-get clean")
            || lower.contains("rm -rf /var/lib/apt/lists")
            || lower.contains("apk --no-cache");

        if cleaned {
            CisResult::pass(ID, DESC)
        } else {
            CisResult::fail(
                ID,
                DESC,
                Severity::Medium,
                "Package manager cache is not cleaned up",
            )
        }
    }
}

/// CIS-4.6: image must define a health check.
pub struct HealthcheckRule;

impl CisRule for HealthcheckRule {
    fn check(&self, dockerfile: &str) -> CisResult {
        const ID: &str = "CIS-4.6";
        const DESC: &str = "Container must define HEALTHCHECK";

        if !dockerfile.to_lowercase().contains("healthcheck") {
            return CisResult::fail(ID, DESC, Severity::Low, "Missing HEALTHCHECK instruction");
        }
        CisResult::pass(ID, DESC)
    }
}

/// CIS-5.2: build context should carry a `.dockerignore`.
///
/// The only rule touching the filesystem; the directory it checks is
/// injected so callers and tests control it.
pub struct DockerIgnoreRule {
    base_dir: PathBuf,
}

impl DockerIgnoreRule {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

impl CisRule for DockerIgnoreRule {
    fn check(&self, _dockerfile: &str) -> CisResult {
        const ID: &str = "CIS-5.2";
        const DESC: &str = "Use a .dockerignore file";

        if self.base_dir.join(".dockerignore").is_file() {
            CisResult::pass(ID, DESC)
        } else {
            CisResult::fail(ID, DESC, Severity::Low, "Missing .dockerignore file")
        }
    }
}

/// CIS-6.1: expose as few ports as possible.
pub struct MinimalPortExposureRule;

impl CisRule for MinimalPortExposureRule {
    fn check(&self, dockerfile: &str) -> CisResult {
        const ID: &str = "CIS-6.1";
        const DESC: &str = "Expose only needed ports";

        if count_lines_with_prefix(dockerfile, "expose") > 1 {
            return CisResult::fail(
                ID,
                DESC,
                Severity::Low,
                "Multiple EXPOSE instructions found",
            );
        }
        CisResult::pass(ID, DESC)
    }
}

/// CIS-7.1: use multi-stage builds.
pub struct MultiStageBuildRule;

impl CisRule for MultiStageBuildRule {
    fn check(&self, dockerfile: &str) -> CisResult {
        const ID: &str = "CIS-7.1";
        const DESC: &str = "Use multi-stage builds";

        if count_lines_with_prefix(dockerfile, "from") <= 1 {
            return CisResult::fail(
                ID,
                DESC,
                Severity::Medium,
                "Dockerfile does not use multi-stage builds",
            );
        }
        CisResult::pass(ID, DESC)
    }
}

/// CIS-8.1: combine RUN instructions to reduce layers.
pub struct CombinedRunRule;

impl CisRule for CombinedRunRule {
    fn check(&self, dockerfile: &str) -> CisResult {
        const ID: &str = "CIS-8.1";
        const DESC: &str = "Combine RUN instructions";

        for line in dockerfile.lines() {
            let trimmed = line.trim();
            if trimmed.to_lowercase().starts_with("run") && !trimmed.contains("&&") {
                return CisResult::fail(
                    ID,
                    DESC,
                    Severity::Low,
                    "RUN instructions should be combined with &&",
                );
            }
        }
        CisResult::pass(ID, DESC)
    }
}

/// CIS-9.1: install dependencies before copying sources.
///
/// Coarse by construction: it compares the last install RUN against the
/// last COPY, so a final-stage COPY in a multi-stage build can trip it.
pub struct OptimizedOrderRule;

impl CisRule for OptimizedOrderRule {
    fn check(&self, dockerfile: &str) -> CisResult {
        const ID: &str = "CIS-9.1";
        const DESC: &str = "Order instructions for layer caching";

        let mut last_install = None;
        let mut last_copy = None;

        for (index, line) in dockerfile.lines().enumerate() {
            let lower = line.trim().to_lowercase();
            if lower.starts_with("run") && lower.contains("install") {
                last_install = Some(index);
            }
            if lower.starts_with("copy") {
                last_copy = Some(index);
            }
        }

        if let (Some(install), Some(copy)) = (last_install, last_copy) {
            if install > copy {
                return CisResult::fail(
                    ID,
                    DESC,
                    Severity::Low,
                    "Dependencies are installed after COPY, defeating layer caching",
                );
            }
        }
        CisResult::pass(ID, DESC)
    }
}
