//! Image analysis report assembly
//!
//! Builds the structured report the formatter renders. All thresholds live
//! on [`ImageMetadata`]; this module only decides which details and
//! suggestions make it into the report.

use serde::{Deserialize, Serialize};

use super::ImageMetadata;
use crate::detection::language::{detect_primary_language, LanguageInfo};
use crate::detection::version::Tier;

/// Everything the analyze command reports about one image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageReport {
    pub name: String,
    pub repo_tags: Vec<String>,
    pub size: String,
    pub size_tier: Tier,
    pub layers: usize,
    pub layer_tier: Tier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<LanguageInfo>,
    /// Author, creation date, and OS are omitted in minimal mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ImageReport {
    /// Full report with details and suggestions.
    pub fn build(name: &str, metadata: &ImageMetadata) -> Self {
        Self::assemble(name, metadata, false, false)
    }

    /// Trimmed report used for the per-image half of a comparison.
    pub fn build_minimal(name: &str, metadata: &ImageMetadata) -> Self {
        Self::assemble(name, metadata, true, true)
    }

    fn assemble(
        name: &str,
        metadata: &ImageMetadata,
        minimal: bool,
        ignore_suggestions: bool,
    ) -> Self {
        let language = detect_primary_language(metadata);

        let suggestions = if ignore_suggestions {
            Vec::new()
        } else {
            build_suggestions(metadata, language.as_ref())
        };

        Self {
            name: name.to_string(),
            repo_tags: metadata.repo_tags.clone(),
            size: metadata.size_string(),
            size_tier: metadata.size_tier(),
            layers: metadata.layers,
            layer_tier: metadata.layer_tier(),
            language,
            author: (!minimal).then(|| metadata.author_display().to_string()),
            created: (!minimal).then(|| metadata.formatted_created()),
            os: (!minimal).then(|| metadata.os.clone()),
            suggestions,
        }
    }
}

fn build_suggestions(metadata: &ImageMetadata, language: Option<&LanguageInfo>) -> Vec<String> {
    let is_big = metadata.size_mb() > 250.0;
    let has_many_layers = metadata.layers > 10;
    let outdated = language.map(|l| l.is_outdated()).unwrap_or(false);

    let mut suggestions = Vec::new();

    if is_big {
        suggestions.push(
            "Consider reducing the size of your image. Try using smaller base images and \
             ensure that no unnecessary files are included."
                .to_string(),
        );
    }

    if has_many_layers {
        suggestions.push(
            "Your image has multiple layers. Consider applying a multi-build stage strategy \
             or combining commands to reduce the number of layers."
                .to_string(),
        );
    }

    if let Some(suggestion) = language.and_then(|l| l.improvement_suggestion()) {
        suggestions.push(suggestion);
    }

    let should_show = is_big || has_many_layers || outdated;
    if language.is_none() && should_show {
        suggestions.push(
            "No programming language runtime detected. Ensure your image is configured \
             correctly if it requires a runtime environment."
                .to_string(),
        );
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::language::Runtime;

    fn metadata(size: i64, layers: usize, env: &[&str]) -> ImageMetadata {
        ImageMetadata {
            size_bytes: size,
            layers,
            env: env.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_small_healthy_image_no_suggestions() {
        let meta = metadata(50_000_000, 5, &["NODE_VERSION=20.0.0"]);
        let report = ImageReport::build("app:1.0", &meta);
        assert!(report.suggestions.is_empty());
        assert_eq!(report.size, "50.00 MB");
        assert_eq!(report.size_tier, Tier::Success);
    }

    #[test]
    fn test_big_image_suggests_shrinking() {
        let meta = metadata(600_000_000, 5, &[]);
        let report = ImageReport::build("app:1.0", &meta);
        assert!(report.suggestions[0].contains("reducing the size"));
        assert_eq!(report.size_tier, Tier::Error);
    }

    #[test]
    fn test_many_layers_suggestion() {
        let meta = metadata(50_000_000, 25, &[]);
        let report = ImageReport::build("app:1.0", &meta);
        assert!(report
            .suggestions
            .iter()
            .any(|s| s.contains("multiple layers")));
        assert_eq!(report.layer_tier, Tier::Error);
    }

    #[test]
    fn test_outdated_language_suggestion() {
        let meta = metadata(50_000_000, 5, &["NODE_VERSION=12.0.0"]);
        let report = ImageReport::build("app:1.0", &meta);

        let language = report.language.unwrap();
        assert_eq!(language.runtime, Runtime::NodeJs);
        assert_eq!(language.tier, Tier::Error);
        assert!(report.suggestions.iter().any(|s| s.contains("outdated")));
    }

    #[test]
    fn test_no_runtime_note_only_with_other_findings() {
        // Big image and no runtime: the note appears.
        let meta = metadata(600_000_000, 5, &[]);
        let report = ImageReport::build("app:1.0", &meta);
        assert!(report
            .suggestions
            .iter()
            .any(|s| s.contains("No programming language runtime")));

        // Healthy image and no runtime: nothing to say.
        let meta = metadata(50_000_000, 5, &[]);
        let report = ImageReport::build("app:1.0", &meta);
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn test_minimal_report_drops_details_and_suggestions() {
        let meta = metadata(600_000_000, 25, &[]);
        let report = ImageReport::build_minimal("app:1.0", &meta);
        assert!(report.author.is_none());
        assert!(report.created.is_none());
        assert!(report.os.is_none());
        assert!(report.suggestions.is_empty());
    }
}
