//! Integration tests for image reporting, comparison, and the AI flows
//!
//! Everything runs against synthetic metadata and the mock provider; no
//! Docker daemon or live model is involved.

use std::sync::Arc;

use dockerlens::ai::mock::MockProvider;
use dockerlens::ai::{AiAnalyzer, ProviderError};
use dockerlens::cli::{OutputFormat, OutputFormatter};
use dockerlens::detection::{Runtime, Tier};
use dockerlens::image::compare::ImageComparison;
use dockerlens::image::report::ImageReport;
use dockerlens::image::ImageMetadata;

fn node_image(version: &str, size_bytes: i64, layers: usize) -> ImageMetadata {
    ImageMetadata {
        repo_tags: vec!["app:latest".to_string()],
        env: vec![format!("NODE_VERSION={}", version)],
        size_bytes,
        layers,
        os: "linux".to_string(),
        created: "2024-06-01T10:00:00Z".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_report_grades_and_suggests() {
    // Big, layered image on an EOL runtime: every suggestion class fires.
    let meta = node_image("12.22.0", 480_000_000, 15);
    let report = ImageReport::build("legacy:1", &meta);

    assert_eq!(report.size_tier, Tier::Warning);
    assert_eq!(report.layer_tier, Tier::Warning);

    let language = report.language.as_ref().unwrap();
    assert_eq!(language.runtime, Runtime::NodeJs);
    assert_eq!(language.tier, Tier::Error);

    assert!(report.suggestions.iter().any(|s| s.contains("smaller base image")
        || s.to_lowercase().contains("size")));
    assert!(report
        .suggestions
        .iter()
        .any(|s| s.to_lowercase().contains("layer")));
    assert!(report.created.is_some());
}

#[test]
fn test_minimal_report_carries_no_suggestions() {
    let meta = node_image("20.11.0", 60_000_000, 6);
    let report = ImageReport::build_minimal("app:1", &meta);

    assert!(report.suggestions.is_empty());
    assert!(report.author.is_none());
}

#[test]
fn test_comparison_end_to_end() {
    let old = node_image("18.19.0", 200_000_000, 14);
    let new = node_image("20.11.0", 90_000_000, 8);

    let comparison = ImageComparison::build("app:old", &old, "app:new", &new);
    let text = OutputFormatter::with_color(OutputFormat::Human, false)
        .format_comparison(&comparison)
        .unwrap();

    assert!(text.contains("app:new"));
    assert!(text.contains("55.00% smaller"));
    assert!(text.contains("6 less layers"));
    assert!(text.contains("uses newer Node.js (20.11.0 > 18.19.0)"));
}

#[test]
fn test_comparison_serializes_to_json() {
    let a = node_image("20.11.0", 90_000_000, 8);
    let b = node_image("20.11.0", 90_000_000, 8);

    let comparison = ImageComparison::build("a:1", &a, "b:1", &b);
    let json = OutputFormatter::with_color(OutputFormat::Json, false)
        .format_comparison(&comparison)
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["first"]["name"], "a:1");
    assert!(value["size"].get("Equal").is_some());
}

#[tokio::test]
async fn test_ai_analysis_flow_parses_sections() {
    let response = "\
SECURITY_SCORE: 72
OPTIMIZATION_SCORE: 55
BEST_PRACTICES_SCORE: 60

SECURITY_ISSUES:
- Container runs as root

OPTIMIZATION_TIPS:
- Switch to an alpine base image

RECOMMENDATIONS:
- Add a HEALTHCHECK

SUMMARY:
Solid image with a few fixable gaps.
";
    let provider = Arc::new(MockProvider::with_response(response));
    let analyzer = AiAnalyzer::new(provider);

    let meta = node_image("20.11.0", 90_000_000, 8);
    let result = analyzer.analyze_image(&meta, "app:1").await.unwrap();

    assert_eq!(result.security_score, 72);
    assert_eq!(result.security_issues, vec!["Container runs as root"]);
    assert_eq!(result.summary, "Solid image with a few fixable gaps.");
}

#[tokio::test]
async fn test_ai_comparison_returns_text_verbatim() {
    let provider = Arc::new(MockProvider::with_response("Image A wins on size."));
    let analyzer = AiAnalyzer::new(provider);

    let a = node_image("20.11.0", 90_000_000, 8);
    let b = node_image("18.19.0", 200_000_000, 14);

    let text = analyzer.compare_images("a:1", &a, "b:1", &b).await.unwrap();
    assert_eq!(text, "Image A wins on size.");
}

#[tokio::test]
async fn test_ai_errors_surface_to_caller() {
    let provider = Arc::new(MockProvider::with_error(ProviderError::Timeout {
        seconds: 30,
    }));
    let analyzer = AiAnalyzer::new(provider);

    let meta = ImageMetadata::default();
    let err = analyzer.suggest_optimizations(&meta, "app:1").await;
    assert!(err.is_err());
}
