//! LLM-backed image analysis
//!
//! Wraps an [`AiProvider`] with the higher-level flows: scored image
//! analysis, image comparison, optimization suggestions, and Dockerfile
//! generation from image metadata. The response format is a loose sectioned
//! text protocol; the parser tolerates missing sections and stray lines.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use super::prompt;
use super::provider::{strip_markdown_fences, AiProvider, ProviderError};
use crate::detection::language::detect_primary_language;
use crate::image::ImageMetadata;

/// Scored analysis of one image as reported by the LLM.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAnalysisResult {
    pub security_score: u32,
    pub optimization_score: u32,
    pub best_practices_score: u32,
    pub security_issues: Vec<String>,
    pub optimization_tips: Vec<String>,
    pub recommendations: Vec<String>,
    pub summary: String,
}

/// High-level AI analysis flows over any provider.
pub struct AiAnalyzer {
    provider: Arc<dyn AiProvider>,
}

impl AiAnalyzer {
    pub fn new(provider: Arc<dyn AiProvider>) -> Self {
        Self { provider }
    }

    /// Analyzes an image and parses the sectioned response.
    pub async fn analyze_image(
        &self,
        metadata: &ImageMetadata,
        image_name: &str,
    ) -> Result<ImageAnalysisResult, ProviderError> {
        let context = prompt::image_context(metadata, image_name);
        let user_prompt = prompt::image_analysis_prompt(&context);

        let response = self
            .provider
            .generate_content(prompt::DOCKERFILE_SYSTEM_PROMPT, &user_prompt, 0.2)
            .await?;

        debug!(provider = self.provider.name(), "image analysis response received");
        Ok(parse_analysis_response(&response))
    }

    /// Compares two images; the comparison text is returned verbatim.
    pub async fn compare_images(
        &self,
        image1_name: &str,
        metadata1: &ImageMetadata,
        image2_name: &str,
        metadata2: &ImageMetadata,
    ) -> Result<String, ProviderError> {
        let context1 = prompt::image_context(metadata1, image1_name);
        let context2 = prompt::image_context(metadata2, image2_name);
        let user_prompt = prompt::image_comparison_prompt(&context1, &context2);

        self.provider
            .generate_content(prompt::DOCKERFILE_SYSTEM_PROMPT, &user_prompt, 0.2)
            .await
    }

    /// Asks for optimization bullet points for an image.
    pub async fn suggest_optimizations(
        &self,
        metadata: &ImageMetadata,
        image_name: &str,
    ) -> Result<Vec<String>, ProviderError> {
        let context = prompt::image_context(metadata, image_name);
        let user_prompt = prompt::optimization_prompt(&context);

        let response = self
            .provider
            .generate_content(prompt::DOCKERFILE_SYSTEM_PROMPT, &user_prompt, 0.2)
            .await?;

        Ok(parse_bullet_points(&response))
    }

    /// Generates an optimized Dockerfile for the application an image runs.
    pub async fn generate_dockerfile(
        &self,
        metadata: &ImageMetadata,
        image_name: &str,
    ) -> Result<String, ProviderError> {
        let language = match detect_primary_language(metadata) {
            Some(info) => format!("{} {}", info.runtime, info.version),
            None => "unknown".to_string(),
        };

        let user_prompt = format!(
            "You are a Docker expert. Generate an optimized Dockerfile for an application.\n\
             \n\
             Current Image: {}\n\
             Detected Language/Runtime: {}\n\
             Current Size: {}\n\
             Current Layers: {}\n\
             \n\
             Generate a production-ready, multi-stage Dockerfile that:\n\
             1. Uses the detected language/runtime\n\
             2. Follows best practices\n\
             3. Optimizes for size and security\n\
             4. Uses non-root user\n\
             5. Implements proper layer caching\n\
             \n\
             Return ONLY the Dockerfile content, nothing else.\n",
            image_name,
            language,
            metadata.size_string(),
            metadata.layers,
        );

        let response = self
            .provider
            .generate_content(prompt::DOCKERFILE_SYSTEM_PROMPT, &user_prompt, 0.2)
            .await?;

        Ok(strip_markdown_fences(&response))
    }
}

/// Parses the sectioned analysis response.
///
/// Unknown lines outside a section are ignored; scores default to zero when
/// absent or unparsable.
pub fn parse_analysis_response(response: &str) -> ImageAnalysisResult {
    let mut result = ImageAnalysisResult::default();
    let mut section = "";

    for raw_line in response.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(value) = line.strip_prefix("SECURITY_SCORE:") {
            result.security_score = parse_score(value);
        } else if let Some(value) = line.strip_prefix("OPTIMIZATION_SCORE:") {
            result.optimization_score = parse_score(value);
        } else if let Some(value) = line.strip_prefix("BEST_PRACTICES_SCORE:") {
            result.best_practices_score = parse_score(value);
        } else if line.starts_with("SECURITY_ISSUES:") {
            section = "security";
        } else if line.starts_with("OPTIMIZATION_TIPS:") {
            section = "optimization";
        } else if line.starts_with("RECOMMENDATIONS:") {
            section = "recommendations";
        } else if line.starts_with("SUMMARY:") {
            section = "summary";
        } else if let Some(item) = line.strip_prefix("- ") {
            match section {
                "security" => result.security_issues.push(item.to_string()),
                "optimization" => result.optimization_tips.push(item.to_string()),
                "recommendations" => result.recommendations.push(item.to_string()),
                _ => {}
            }
        } else if section == "summary" {
            result.summary.push_str(line);
            result.summary.push(' ');
        }
    }

    result.summary = result.summary.trim().to_string();
    result
}

fn parse_score(value: &str) -> u32 {
    value.trim().parse().unwrap_or(0)
}

fn parse_bullet_points(response: &str) -> Vec<String> {
    response
        .lines()
        .filter_map(|line| line.trim().strip_prefix("- "))
        .map(|item| item.to_string())
        .collect()
}
