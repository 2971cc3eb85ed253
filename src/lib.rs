//! dockerlens - Docker image and Dockerfile analysis
//!
//! This library inspects Docker images for size, layering, and runtime
//! freshness, lints Dockerfiles against the CIS Docker Benchmark, detects
//! project technology from the file tree, and generates production
//! Dockerfiles with an optional LLM assist.
//!
//! # Core Concepts
//!
//! - **Image reports**: Metadata pulled from the Docker daemon is graded
//!   into size, layer, and runtime-version tiers with improvement
//!   suggestions
//! - **CIS analysis**: A fixed set of CIS Docker Benchmark rules is run
//!   against Dockerfile text and rolled up into a percentage score
//! - **Technology detection**: Manifest files and file-extension counts
//!   identify the language, framework, package manager, and build tool of
//!   a source project
//! - **AI providers**: Pluggable LLM backends (OpenAI, Gemini, Claude,
//!   Ollama) behind one trait, used for image analysis and Dockerfile
//!   generation
//!
//! # Example Usage
//!
//! ```ignore
//! use dockerlens::security::{security_score, CisAnalyzer};
//!
//! let dockerfile = std::fs::read_to_string("Dockerfile")?;
//! let results = CisAnalyzer::new().analyze(&dockerfile);
//! println!("Security score: {}%", security_score(&results));
//! ```
//!
//! # Project Structure
//!
//! - [`image`]: Daemon inspection, image reports, pairwise comparison
//! - [`security`]: CIS Docker Benchmark rules and scoring
//! - [`detection`]: Runtime version tiers, image language detection,
//!   project technology detection
//! - [`dockerfile`]: Dockerfile generation and static templates
//! - [`ai`]: LLM provider implementations and analysis flows

// Public modules
pub mod ai;
pub mod cli;
pub mod config;
pub mod detection;
pub mod dockerfile;
pub mod fs;
pub mod image;
pub mod security;

// Re-export key types for convenient access
pub use ai::{AiAnalyzer, AiProvider, GenAiProvider, ImageAnalysisResult, Provider, ProviderError};
pub use config::{ConfigError, DockerlensConfig};
pub use detection::{detect_primary_language, LanguageInfo, ProjectTechnology, Runtime, Tier};
pub use image::{ImageMetadata, InspectError};
pub use security::{security_score, CisAnalyzer, CisResult, Severity};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_dockerlens() {
        assert_eq!(NAME, "dockerlens");
    }
}
