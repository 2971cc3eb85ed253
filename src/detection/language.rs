//! Primary runtime detection for Docker images
//!
//! Identifies the single most likely runtime baked into an image from its
//! metadata. Detection is a strict priority cascade: version environment
//! variables first (most specific), then command/entrypoint sniffing, then a
//! compiled-binary size heuristic. The first matching step wins, so an
//! explicit `NODE_VERSION` always masks an incidental `GOPATH`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::version::{
    classify, major_version, Tier, VERSION_COMPILED, VERSION_DETECTED, VERSION_UNKNOWN,
};
use crate::image::ImageMetadata;

/// Closed set of runtimes the detector can identify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Runtime {
    #[serde(rename = "nodejs")]
    NodeJs,
    Python,
    Java,
    Go,
    Php,
    Ruby,
    #[serde(rename = "dotnet")]
    DotNet,
    Rust,
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Runtime::NodeJs => "Node.js",
            Runtime::Python => "Python",
            Runtime::Java => "Java",
            Runtime::Go => "Go",
            Runtime::Php => "PHP",
            Runtime::Ruby => "Ruby",
            Runtime::DotNet => ".NET",
            Runtime::Rust => "Rust",
        };
        write!(f, "{}", name)
    }
}

/// A detected runtime with its version signal and freshness tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub runtime: Runtime,
    /// Semantic version, or one of the sentinels `detected` / `unknown` /
    /// `compiled`.
    pub version: String,
    pub tier: Tier,
}

impl LanguageInfo {
    fn classified(runtime: Runtime, version: String) -> Self {
        let tier = classify(runtime, &version);
        Self {
            runtime,
            version,
            tier,
        }
    }

    /// True when the detected version warrants attention.
    pub fn is_outdated(&self) -> bool {
        matches!(self.tier, Tier::Error | Tier::Warning)
    }

    /// Improvement suggestion for the report, when the tier warrants one.
    pub fn improvement_suggestion(&self) -> Option<String> {
        match self.tier {
            Tier::Error => Some(format!(
                "{} version {} is outdated and may have security vulnerabilities. \
                 Consider upgrading to a newer version.",
                self.runtime, self.version
            )),
            Tier::Warning if self.version == VERSION_UNKNOWN => Some(format!(
                "{} runtime detected but version could not be determined. \
                 Consider using official base images with explicit version tags.",
                self.runtime
            )),
            Tier::Warning => Some(format!(
                "{} version {} is approaching end-of-life. \
                 Consider upgrading to ensure continued support.",
                self.runtime, self.version
            )),
            Tier::Success => None,
        }
    }
}

/// One step of the detection cascade.
type DetectorStep = fn(&ImageMetadata) -> Option<LanguageInfo>;

/// Ordered detection cascade. Order is load-bearing: steps are evaluated
/// top to bottom and the first match wins.
const CASCADE: &[DetectorStep] = &[
    detect_nodejs,
    detect_python,
    detect_java,
    detect_go,
    detect_php,
    detect_ruby,
    detect_dotnet,
    detect_rust,
    detect_by_command,
    detect_compiled_binary,
];

/// Detects the primary runtime of an image, if any.
///
/// Pure function of the metadata; returns `None` when no signal matches,
/// which is a valid terminal state rather than an error.
pub fn detect_primary_language(metadata: &ImageMetadata) -> Option<LanguageInfo> {
    CASCADE.iter().find_map(|step| step(metadata))
}

/// Major version of the detected Node.js runtime, `0` when the image does
/// not run Node.js. Used by the image comparison path.
pub fn node_major_version(metadata: &ImageMetadata) -> u32 {
    match detect_primary_language(metadata) {
        Some(info) if info.runtime == Runtime::NodeJs => major_version(&info.version),
        _ => 0,
    }
}

fn env_value<'a>(env: &'a [String], key: &str) -> Option<&'a str> {
    let prefix = format!("{}=", key);
    env.iter()
        .find_map(|var| var.strip_prefix(prefix.as_str()))
}

fn detect_nodejs(metadata: &ImageMetadata) -> Option<LanguageInfo> {
    let version = env_value(&metadata.env, "NODE_VERSION")?;
    Some(LanguageInfo::classified(
        Runtime::NodeJs,
        version.to_string(),
    ))
}

fn detect_python(metadata: &ImageMetadata) -> Option<LanguageInfo> {
    let version = env_value(&metadata.env, "PYTHON_VERSION")?;
    Some(LanguageInfo::classified(
        Runtime::Python,
        version.to_string(),
    ))
}

fn detect_java(metadata: &ImageMetadata) -> Option<LanguageInfo> {
    // Single pass: the first JAVA_VERSION or JAVA_HOME in image order wins.
    for var in &metadata.env {
        if let Some(version) = var.strip_prefix("JAVA_VERSION=") {
            return Some(LanguageInfo::classified(Runtime::Java, version.to_string()));
        }
        if let Some(path) = var.strip_prefix("JAVA_HOME=") {
            // Paths like /usr/lib/jvm/java-17-openjdk carry the version.
            let version = match path.split_once("java-") {
                Some((_, rest)) => rest.split('/').next().unwrap_or(rest).to_string(),
                None => VERSION_DETECTED.to_string(),
            };
            return Some(LanguageInfo::classified(Runtime::Java, version));
        }
    }
    None
}

fn detect_go(metadata: &ImageMetadata) -> Option<LanguageInfo> {
    for var in &metadata.env {
        if let Some(version) = var
            .strip_prefix("GOLANG_VERSION=")
            .or_else(|| var.strip_prefix("GO_VERSION="))
        {
            return Some(LanguageInfo::classified(Runtime::Go, version.to_string()));
        }
    }
    // GOPATH alone is a weaker signal, checked only after explicit versions.
    if env_value(&metadata.env, "GOPATH").is_some() {
        return Some(LanguageInfo::classified(
            Runtime::Go,
            VERSION_DETECTED.to_string(),
        ));
    }
    None
}

fn detect_php(metadata: &ImageMetadata) -> Option<LanguageInfo> {
    let version = env_value(&metadata.env, "PHP_VERSION")?;
    Some(LanguageInfo::classified(Runtime::Php, version.to_string()))
}

fn detect_ruby(metadata: &ImageMetadata) -> Option<LanguageInfo> {
    let version = env_value(&metadata.env, "RUBY_VERSION")?;
    Some(LanguageInfo::classified(Runtime::Ruby, version.to_string()))
}

fn detect_dotnet(metadata: &ImageMetadata) -> Option<LanguageInfo> {
    for var in &metadata.env {
        if let Some(version) = var
            .strip_prefix("DOTNET_VERSION=")
            .or_else(|| var.strip_prefix("ASPNETCORE_VERSION="))
        {
            return Some(LanguageInfo::classified(
                Runtime::DotNet,
                version.to_string(),
            ));
        }
    }
    None
}

fn detect_rust(metadata: &ImageMetadata) -> Option<LanguageInfo> {
    for var in &metadata.env {
        if let Some(version) = var.strip_prefix("RUST_VERSION=") {
            return Some(LanguageInfo::classified(Runtime::Rust, version.to_string()));
        }
        if var.starts_with("CARGO_HOME=") {
            return Some(LanguageInfo::classified(
                Runtime::Rust,
                VERSION_DETECTED.to_string(),
            ));
        }
    }
    None
}

/// Command/entrypoint substring sniffing for interpreted runtimes.
///
/// The version stays unknown, so the tier is a flat warning regardless of
/// what the version classifier would say.
fn detect_by_command(metadata: &ImageMetadata) -> Option<LanguageInfo> {
    let mut tokens: Vec<&str> = metadata.entrypoint.iter().map(String::as_str).collect();
    tokens.extend(metadata.cmd.iter().map(String::as_str));
    let command = tokens.join(" ");

    let runtime = if command.contains("node") || command.contains("npm") {
        Runtime::NodeJs
    } else if command.contains("python") {
        Runtime::Python
    } else if command.contains("java -jar") || command.contains("java ") {
        Runtime::Java
    } else if command.contains("php") {
        Runtime::Php
    } else if command.contains("ruby") {
        Runtime::Ruby
    } else if command.contains("dotnet") {
        Runtime::DotNet
    } else {
        return None;
    };

    Some(LanguageInfo {
        runtime,
        version: VERSION_UNKNOWN.to_string(),
        tier: Tier::Warning,
    })
}

/// Compiled-binary heuristic, currently Go only.
///
/// Small images whose entrypoint is a bare binary under a conventional path
/// are overwhelmingly Go builds; interpreted-runtime names in the path rule
/// the heuristic out.
fn detect_compiled_binary(metadata: &ImageMetadata) -> Option<LanguageInfo> {
    let binary = metadata.entrypoint.first()?;
    let size_mb = metadata.size_mb();

    let likely_go_binary = (binary.starts_with("/app/")
        || binary.starts_with("/usr/local/bin/")
        || binary.starts_with("/bin/"))
        && !binary.ends_with(".sh")
        && !["python", "node", "java", "ruby", "php"]
            .iter()
            .any(|name| binary.contains(name));

    let has_go_working_dir = metadata.working_dir == "/app" || metadata.working_dir == "/go/src/app";
    let is_small_image = size_mb > 5.0 && size_mb < 100.0;

    if likely_go_binary && (has_go_working_dir || is_small_image) {
        if size_mb < 20.0 || (has_go_working_dir && is_small_image) {
            return Some(LanguageInfo {
                runtime: Runtime::Go,
                version: VERSION_COMPILED.to_string(),
                tier: Tier::Success,
            });
        }
    }

    None
}
