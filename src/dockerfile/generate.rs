//! Dockerfile generation flow
//!
//! Detects the project, asks the provider for a Dockerfile, and falls back
//! to the static templates on any provider failure. Output lands in
//! `Dockerlens.Dockerfile` next to a generated `.dockerignore`.

use std::io;
use std::path::Path;
use tracing::{info, warn};

use super::templates::fallback_dockerfile;
use crate::ai::prompt;
use crate::ai::provider::{strip_markdown_fences, AiProvider};
use crate::detection::project::{self, ProjectTechnology};
use crate::fs::{render_project_tree, ProjectSnapshot};

/// File name the generated Dockerfile is written to.
pub const DOCKERFILE_NAME: &str = "Dockerlens.Dockerfile";

/// File name of the generated ignore file.
pub const DOCKERIGNORE_NAME: &str = ".dockerignore";

/// What a generation run produced.
#[derive(Debug, Clone)]
pub struct GeneratedDockerfile {
    pub content: String,
    pub technology: ProjectTechnology,
    /// True when the content came from a static template instead of the
    /// provider.
    pub from_template: bool,
}

/// Generates a Dockerfile from the detected project technology.
pub async fn generate(
    snapshot: &ProjectSnapshot,
    provider: &dyn AiProvider,
    ignore_comments: bool,
) -> GeneratedDockerfile {
    let tech = project::detect_smart(snapshot, provider).await;
    info!(detected = %tech.summary(), "generating Dockerfile");

    let tech_json = match serde_json::to_string_pretty(&tech) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "could not serialize detection result, using template");
            return template_result(snapshot, tech, ignore_comments);
        }
    };

    let user_prompt = prompt::dockerfile_generation_prompt(&tech_json, ignore_comments);

    match provider
        .generate_content(prompt::DOCKERFILE_SYSTEM_PROMPT, &user_prompt, 0.2)
        .await
    {
        Ok(response) => GeneratedDockerfile {
            content: strip_markdown_fences(&response),
            technology: tech,
            from_template: false,
        },
        Err(e) => {
            warn!(error = %e, "Dockerfile generation failed, falling back to template");
            template_result(snapshot, tech, ignore_comments)
        }
    }
}

/// Offline generation: heuristic detection plus static templates, no
/// provider involved.
pub fn generate_offline(snapshot: &ProjectSnapshot, ignore_comments: bool) -> GeneratedDockerfile {
    let tech = project::detect(snapshot);
    info!(detected = %tech.summary(), "generating Dockerfile from templates");
    template_result(snapshot, tech, ignore_comments)
}

/// Alternate path: generate from the rendered project tree instead of the
/// detection record.
pub async fn generate_from_tree(
    snapshot: &ProjectSnapshot,
    provider: &dyn AiProvider,
    ignore_comments: bool,
) -> GeneratedDockerfile {
    let tech = project::detect_smart(snapshot, provider).await;

    let tree = match render_project_tree(&snapshot.root) {
        Ok(tree) => tree,
        Err(e) => {
            warn!(error = %e, "could not render project tree, using template");
            return template_result(snapshot, tech, ignore_comments);
        }
    };

    let user_prompt = prompt::dockerfile_from_tree_prompt(&tree, ignore_comments);

    match provider
        .generate_content(prompt::DOCKERFILE_SYSTEM_PROMPT, &user_prompt, 0.2)
        .await
    {
        Ok(response) => GeneratedDockerfile {
            content: strip_markdown_fences(&response),
            technology: tech,
            from_template: false,
        },
        Err(e) => {
            warn!(error = %e, "tree-based generation failed, falling back to template");
            template_result(snapshot, tech, ignore_comments)
        }
    }
}

fn template_result(
    snapshot: &ProjectSnapshot,
    tech: ProjectTechnology,
    ignore_comments: bool,
) -> GeneratedDockerfile {
    let content = fallback_dockerfile(&tech, has_build_script(snapshot), ignore_comments);
    GeneratedDockerfile {
        content,
        technology: tech,
        from_template: true,
    }
}

/// Whether `package.json` declares a `build` script.
pub fn has_build_script(snapshot: &ProjectSnapshot) -> bool {
    let Some(raw) = snapshot.read_file("package.json") else {
        return false;
    };
    let Ok(pkg) = serde_json::from_str::<serde_json::Value>(&raw) else {
        return false;
    };
    pkg.get("scripts")
        .and_then(|s| s.get("build"))
        .is_some()
}

/// Writes the Dockerfile and a `.dockerignore` into `dir`.
pub fn write_outputs(dir: &Path, dockerfile: &str) -> io::Result<()> {
    std::fs::write(dir.join(DOCKERFILE_NAME), dockerfile)?;
    std::fs::write(dir.join(DOCKERIGNORE_NAME), dockerignore_content())?;
    Ok(())
}

/// Default `.dockerignore` covering the directories the scanner skips plus
/// local-only files.
pub fn dockerignore_content() -> &'static str {
    "\
node_modules
.git
.gitignore
*.md
.env
.env.*
dist
build
target
__pycache__
*.log
Dockerfile
Dockerlens.Dockerfile
.dockerignore
docker-compose.yml
docker-compose.yaml
"
}
