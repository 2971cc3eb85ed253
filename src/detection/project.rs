//! Project technology detection from a local file tree
//!
//! Works on a [`ProjectSnapshot`] rather than image metadata: extension
//! counts pick the primary language, then exactly one language-specific
//! sub-detector enriches the record from manifest files. When the
//! heuristics come up empty, the smart variant asks an LLM, falling back
//! to the heuristic result on any provider failure.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::ai::prompt;
use crate::ai::provider::{strip_markdown_fences, AiProvider};
use crate::fs::ProjectSnapshot;

/// Everything we know about a source project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTechnology {
    pub language: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub framework: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub build_tool: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub package_manager: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    pub config_files: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dev_dependencies: BTreeMap<String, String>,
    pub root_files: Vec<String>,
    pub file_extensions: BTreeMap<String, usize>,
}

impl ProjectTechnology {
    /// Whether the heuristics failed to identify a language.
    pub fn language_unknown(&self) -> bool {
        self.language.is_empty() || self.language == "unknown"
    }

    /// One-line human summary, e.g. `javascript (react) [npm]`.
    pub fn summary(&self) -> String {
        let mut out = self.language.clone();
        if !self.framework.is_empty() {
            out.push_str(&format!(" ({})", self.framework));
        }
        if !self.package_manager.is_empty() {
            out.push_str(&format!(" [{}]", self.package_manager));
        }
        out
    }
}

/// Extension to language mapping used for the primary-language vote.
const EXTENSION_LANGUAGES: &[(&str, &str)] = &[
    (".js", "javascript"),
    (".jsx", "javascript"),
    (".ts", "typescript"),
    (".tsx", "typescript"),
    (".py", "python"),
    (".go", "go"),
    (".java", "java"),
    (".kt", "kotlin"),
    (".rs", "rust"),
    (".php", "php"),
    (".rb", "ruby"),
    (".cs", "csharp"),
    (".cpp", "cpp"),
    (".c", "c"),
    (".swift", "swift"),
    (".dart", "dart"),
];

/// Detects the project technology from a snapshot. Pure given the snapshot
/// contents, except for the manifest reads done by the sub-detectors.
pub fn detect(snapshot: &ProjectSnapshot) -> ProjectTechnology {
    let mut tech = ProjectTechnology {
        language: language_from_extensions(&snapshot.extension_counts),
        config_files: snapshot.config_files.clone(),
        root_files: snapshot.root_files.clone(),
        file_extensions: snapshot.extension_counts.clone(),
        ..Default::default()
    };

    match tech.language.as_str() {
        "javascript" | "typescript" => detect_nodejs(&mut tech, snapshot),
        "python" => detect_python(&mut tech, snapshot),
        "go" => detect_go(&mut tech, snapshot),
        "java" => detect_java(&mut tech, snapshot),
        "rust" => detect_rust(&mut tech, snapshot),
        "php" => detect_php(&mut tech, snapshot),
        "ruby" => detect_ruby(&mut tech, snapshot),
        "csharp" => detect_csharp(&mut tech, snapshot),
        _ => detect_by_config_files(&mut tech, snapshot),
    }

    debug!(language = %tech.language, framework = %tech.framework, "project detected");
    tech
}

/// Heuristic detection with an LLM fallback for unrecognized projects.
///
/// The provider is consulted only when the heuristics yield no language;
/// provider errors and malformed JSON leave the heuristic result intact.
pub async fn detect_smart(
    snapshot: &ProjectSnapshot,
    provider: &dyn AiProvider,
) -> ProjectTechnology {
    let mut tech = detect(snapshot);

    if tech.language_unknown() {
        warn!("could not detect project type heuristically, asking the model");
        if let Err(e) = detect_with_ai(&mut tech, provider).await {
            warn!(error = %e, "AI project detection failed");
        }
    }

    tech
}

/// Votes on the primary language by extension count.
///
/// Ties break alphabetically on the language name; with no recognized
/// extensions the result is `"unknown"`.
fn language_from_extensions(extension_counts: &BTreeMap<String, usize>) -> String {
    let mut votes: BTreeMap<&str, usize> = BTreeMap::new();
    for (ext, count) in extension_counts {
        if let Some((_, language)) = EXTENSION_LANGUAGES.iter().find(|(e, _)| e == ext) {
            *votes.entry(language).or_insert(0) += count;
        }
    }

    let mut best = ("unknown", 0);
    for (language, count) in votes {
        if count > best.1 {
            best = (language, count);
        }
    }
    best.0.to_string()
}

fn detect_nodejs(tech: &mut ProjectTechnology, snapshot: &ProjectSnapshot) {
    let Some(raw) = snapshot.read_file("package.json") else {
        return;
    };
    let Ok(pkg) = serde_json::from_str::<serde_json::Value>(&raw) else {
        return;
    };

    tech.package_manager = if snapshot.has_file("yarn.lock") {
        "yarn".to_string()
    } else if snapshot.has_file("pnpm-lock.yaml") {
        "pnpm".to_string()
    } else {
        "npm".to_string()
    };

    tech.dependencies = dependency_map(&pkg, "dependencies");
    tech.dev_dependencies = dependency_map(&pkg, "devDependencies");

    let has_dep = |name: &str| {
        tech.dependencies.contains_key(name) || tech.dev_dependencies.contains_key(name)
    };

    tech.framework = if has_dep("next") {
        "nextjs"
    } else if has_dep("nuxt") {
        "nuxt"
    } else if has_dep("react") {
        "react"
    } else if has_dep("vue") {
        "vue"
    } else if has_dep("svelte") {
        "svelte"
    } else if has_dep("express") {
        "express"
    } else if has_dep("nestjs") {
        "nestjs"
    } else {
        ""
    }
    .to_string();

    tech.build_tool = if snapshot.has_file("vite.config.js")
        || snapshot.has_file("vite.config.ts")
        || has_dep("vite")
    {
        "vite"
    } else if snapshot.has_file("webpack.config.js") || has_dep("webpack") {
        "webpack"
    } else {
        ""
    }
    .to_string();
}

fn detect_python(tech: &mut ProjectTechnology, snapshot: &ProjectSnapshot) {
    tech.language = "python".to_string();

    if snapshot.has_file("Pipfile") {
        tech.package_manager = "pipenv".to_string();
    } else if snapshot.has_file("poetry.lock") {
        tech.package_manager = "poetry".to_string();
    } else if snapshot.has_file("requirements.txt") {
        tech.package_manager = "pip".to_string();
    } else if snapshot.has_file("conda.yml") || snapshot.has_file("environment.yml") {
        tech.package_manager = "conda".to_string();
    }

    if snapshot.has_file("manage.py") {
        tech.framework = "django".to_string();
    } else if snapshot.has_file("app.py") || snapshot.has_file("main.py") {
        if let Some(content) = snapshot.read_file("app.py") {
            if content.contains("from flask") || content.contains("import flask") {
                tech.framework = "flask".to_string();
            } else if content.contains("from fastapi") || content.contains("import fastapi") {
                tech.framework = "fastapi".to_string();
            }
        }
    }
}

fn detect_go(tech: &mut ProjectTechnology, snapshot: &ProjectSnapshot) {
    tech.language = "go".to_string();
    tech.package_manager = "go modules".to_string();

    let Some(content) = snapshot.read_file("go.mod") else {
        return;
    };

    if content.contains("github.com/gin-gonic/gin") {
        tech.framework = "gin".to_string();
    } else if content.contains("github.com/gofiber/fiber") {
        tech.framework = "fiber".to_string();
    } else if content.contains("github.com/labstack/echo") {
        tech.framework = "echo".to_string();
    }

    for line in content.lines() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix("go ") {
            if let Some(version) = rest.split_whitespace().next() {
                tech.version = version.to_string();
            }
            break;
        }
    }
}

fn detect_java(tech: &mut ProjectTechnology, snapshot: &ProjectSnapshot) {
    tech.language = "java".to_string();

    if snapshot.has_file("pom.xml") {
        tech.package_manager = "maven".to_string();
        tech.build_tool = "maven".to_string();
    } else if snapshot.has_file("build.gradle") || snapshot.has_file("build.gradle.kts") {
        tech.package_manager = "gradle".to_string();
        tech.build_tool = "gradle".to_string();
    }

    if tech.package_manager == "maven" {
        if let Some(content) = snapshot.read_file("pom.xml") {
            if content.contains("spring-boot") {
                tech.framework = "spring-boot".to_string();
            }
        }
    }
}

fn detect_rust(tech: &mut ProjectTechnology, snapshot: &ProjectSnapshot) {
    tech.language = "rust".to_string();
    tech.package_manager = "cargo".to_string();
    tech.build_tool = "cargo".to_string();

    if let Some(content) = snapshot.read_file("Cargo.toml") {
        if content.contains("actix-web") {
            tech.framework = "actix-web".to_string();
        } else if content.contains("rocket") {
            tech.framework = "rocket".to_string();
        } else if content.contains("axum") {
            tech.framework = "axum".to_string();
        }
    }
}

fn detect_php(tech: &mut ProjectTechnology, snapshot: &ProjectSnapshot) {
    tech.language = "php".to_string();

    if snapshot.has_file("composer.json") {
        tech.package_manager = "composer".to_string();

        if let Some(content) = snapshot.read_file("composer.json") {
            if content.contains("laravel/framework") {
                tech.framework = "laravel".to_string();
            } else if content.contains("symfony/symfony") {
                tech.framework = "symfony".to_string();
            }
        }
    }
}

fn detect_ruby(tech: &mut ProjectTechnology, snapshot: &ProjectSnapshot) {
    tech.language = "ruby".to_string();

    if snapshot.has_file("Gemfile") {
        tech.package_manager = "bundler".to_string();

        if let Some(content) = snapshot.read_file("Gemfile") {
            if content.contains("rails") {
                tech.framework = "rails".to_string();
            } else if content.contains("sinatra") {
                tech.framework = "sinatra".to_string();
            }
        }
    }
}

fn detect_csharp(tech: &mut ProjectTechnology, snapshot: &ProjectSnapshot) {
    tech.language = "csharp".to_string();
    tech.package_manager = "nuget".to_string();

    if let Some(first) = snapshot.csproj_files().first() {
        if let Some(content) = snapshot.read_file(first) {
            if content.contains("Microsoft.AspNetCore") {
                tech.framework = "aspnet-core".to_string();
            }
        }
    }
}

/// Last resort when no extension vote lands: dispatch on which known config
/// files exist, in fixed priority order, first hit wins.
fn detect_by_config_files(tech: &mut ProjectTechnology, snapshot: &ProjectSnapshot) {
    if snapshot.has_file("package.json") {
        tech.language = "javascript".to_string();
        detect_nodejs(tech, snapshot);
    } else if snapshot.has_file("go.mod") {
        detect_go(tech, snapshot);
    } else if snapshot.has_file("requirements.txt")
        || snapshot.has_file("Pipfile")
        || snapshot.has_file("pyproject.toml")
    {
        detect_python(tech, snapshot);
    } else if snapshot.has_file("Cargo.toml") {
        detect_rust(tech, snapshot);
    } else if snapshot.has_file("composer.json") {
        detect_php(tech, snapshot);
    }
}

/// The strict JSON object the model must answer with.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AiDetection {
    #[serde(default)]
    language: String,
    #[serde(default)]
    framework: String,
    #[serde(default)]
    package_manager: String,
    #[serde(default)]
    build_tool: String,
}

async fn detect_with_ai(
    tech: &mut ProjectTechnology,
    provider: &dyn AiProvider,
) -> anyhow::Result<()> {
    let context = serde_json::json!({
        "rootFiles": tech.root_files,
        "configFiles": tech.config_files,
        "fileExtensions": tech.file_extensions,
    });
    let context_json = serde_json::to_string_pretty(&context)?;
    let user_prompt = prompt::project_detection_prompt(&context_json);

    let response = provider
        .generate_content(prompt::DETECTION_SYSTEM_PROMPT, &user_prompt, 0.1)
        .await?;

    let cleaned = strip_markdown_fences(&response);
    let result: AiDetection = serde_json::from_str(&cleaned)?;

    if !result.language.is_empty() {
        tech.language = result.language;
    }
    if !result.framework.is_empty() {
        tech.framework = result.framework;
    }
    if !result.package_manager.is_empty() {
        tech.package_manager = result.package_manager;
    }
    if !result.build_tool.is_empty() {
        tech.build_tool = result.build_tool;
    }

    info!(language = %tech.language, "AI detected project technology");
    Ok(())
}

fn dependency_map(pkg: &serde_json::Value, key: &str) -> BTreeMap<String, String> {
    let mut deps = BTreeMap::new();
    if let Some(object) = pkg.get(key).and_then(|v| v.as_object()) {
        for (name, value) in object {
            if let Some(version) = value.as_str() {
                deps.insert(name.clone(), version.to_string());
            }
        }
    }
    deps
}
