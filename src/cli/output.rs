//! Output formatting
//!
//! Renders reports, CIS results, comparisons, and detection results as
//! human text (with ANSI tier colors when stdout is a terminal), JSON, or
//! YAML.

use anyhow::{Context, Result};
use std::fmt::Write;

use crate::detection::project::ProjectTechnology;
use crate::detection::version::Tier;
use crate::image::compare::{
    ImageComparison, LanguageComparison, LayerComparison, SizeComparison,
};
use crate::image::report::ImageReport;
use crate::security::{security_score, CisResult};

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Human,
}

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Formatter for all CLI output.
pub struct OutputFormatter {
    format: OutputFormat,
    color: bool,
}

impl OutputFormatter {
    /// Formatter with colors enabled only when stdout is a terminal.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: atty::is(atty::Stream::Stdout),
        }
    }

    /// Formatter with explicit color control, used by tests.
    pub fn with_color(format: OutputFormat, color: bool) -> Self {
        Self { format, color }
    }

    pub fn format_report(&self, report: &ImageReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(report).context("Failed to serialize report to YAML")
            }
            OutputFormat::Human => Ok(self.render_report(report)),
        }
    }

    pub fn format_cis_results(&self, results: &[CisResult]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "results": results,
                    "score": security_score(results),
                });
                serde_json::to_string_pretty(&output)
                    .context("Failed to serialize CIS results to JSON")
            }
            OutputFormat::Yaml => {
                let output = serde_json::json!({
                    "results": results,
                    "score": security_score(results),
                });
                serde_yaml::to_string(&output).context("Failed to serialize CIS results to YAML")
            }
            OutputFormat::Human => Ok(self.render_cis_results(results)),
        }
    }

    pub fn format_comparison(&self, comparison: &ImageComparison) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(comparison)
                .context("Failed to serialize comparison to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(comparison)
                .context("Failed to serialize comparison to YAML"),
            OutputFormat::Human => Ok(self.render_comparison(comparison)),
        }
    }

    pub fn format_technology(&self, tech: &ProjectTechnology) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(tech)
                .context("Failed to serialize detection result to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(tech)
                .context("Failed to serialize detection result to YAML"),
            OutputFormat::Human => Ok(self.render_technology(tech)),
        }
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if self.color {
            format!("{}{}{}", code, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn tier_paint(&self, text: &str, tier: Tier) -> String {
        let code = match tier {
            Tier::Success => GREEN,
            Tier::Warning => YELLOW,
            Tier::Error => RED,
        };
        self.paint(text, code)
    }

    fn render_report(&self, report: &ImageReport) -> String {
        let mut out = String::new();

        let _ = writeln!(
            out,
            "Details of image {}:",
            self.paint(&report.name, BOLD)
        );
        let _ = writeln!(out, "  - Tags: {:?}", report.repo_tags);
        let _ = writeln!(
            out,
            "  - Size: {}",
            self.tier_paint(&report.size, report.size_tier)
        );
        let _ = writeln!(
            out,
            "  - N. of Layers: {}",
            self.tier_paint(&report.layers.to_string(), report.layer_tier)
        );

        match &report.language {
            Some(info) => {
                let text = format!("{} {}", info.runtime, info.version);
                let _ = writeln!(out, "  - Language: {}", self.tier_paint(&text, info.tier));
            }
            None => {
                let _ = writeln!(out, "  - Language: none detected");
            }
        }

        if let Some(author) = &report.author {
            let _ = writeln!(out, "  - Author: {}", author);
        }
        if let Some(created) = &report.created {
            let _ = writeln!(out, "  - Creation date: {}", created);
        }
        if let Some(os) = &report.os {
            let _ = writeln!(out, "  - OS: {}", os);
        }

        if !report.suggestions.is_empty() {
            let _ = writeln!(out, "\n Improvement suggestions:");
            for suggestion in &report.suggestions {
                let _ = writeln!(out, "  - {}", suggestion);
            }
        }

        out
    }

    fn render_cis_results(&self, results: &[CisResult]) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "\nSecurity Analysis based on CIS Docker Benchmark:\n");

        for result in results {
            let status = if result.passed {
                self.paint("PASS", GREEN)
            } else {
                self.paint("FAIL", RED)
            };
            let _ = writeln!(out, "[{}] {} - {}", status, result.rule_id, result.description);

            if !result.passed {
                if let Some(severity) = result.severity {
                    let _ = writeln!(out, "  Severity: {}", severity);
                }
                let _ = writeln!(out, "  Issue: {}\n", result.message);
            }
        }

        let _ = writeln!(out, "Security Score: {}%", security_score(results));
        out
    }

    fn render_comparison(&self, comparison: &ImageComparison) -> String {
        let mut out = String::new();

        out.push_str(&self.render_report(&comparison.first));
        out.push('\n');
        out.push_str(&self.render_report(&comparison.second));

        let _ = writeln!(out, "\nComparison:");

        match &comparison.size {
            SizeComparison::Equal { size } => {
                let _ = writeln!(out, "  - Images have the same size: {}", size);
            }
            SizeComparison::Smaller {
                smaller_name,
                smaller_size,
                larger_name,
                larger_size,
                percent,
            } => {
                let _ = writeln!(
                    out,
                    "  - Image {} is {} than image {} ({} < {}).",
                    self.paint(smaller_name, GREEN),
                    self.paint(&format!("{:.2}% smaller", percent), GREEN),
                    self.paint(larger_name, RED),
                    self.paint(smaller_size, GREEN),
                    self.paint(larger_size, RED),
                );
            }
        }

        match &comparison.layers {
            LayerComparison::Equal { layers } => {
                let _ = writeln!(out, "  - Images have the same number of layers: {}", layers);
            }
            LayerComparison::Fewer {
                fewer_name,
                fewer_layers,
                more_name,
                more_layers,
                difference,
            } => {
                let _ = writeln!(
                    out,
                    "  - Image {} has {} than image {} ({} < {}).",
                    self.paint(fewer_name, GREEN),
                    self.paint(&format!("{} less layers", difference), GREEN),
                    self.paint(more_name, RED),
                    self.paint(&fewer_layers.to_string(), GREEN),
                    self.paint(&more_layers.to_string(), RED),
                );
            }
        }

        match &comparison.language {
            LanguageComparison::NeitherDetected => {
                let _ = writeln!(
                    out,
                    "  - No programming language runtime detected in either image."
                );
            }
            LanguageComparison::OnlyOne { name, language } => {
                let _ = writeln!(
                    out,
                    "  - Only image {} has detected language runtime: {} {}",
                    self.paint(name, GREEN),
                    language.runtime,
                    language.version
                );
            }
            LanguageComparison::Different { first, second } => {
                let _ = writeln!(
                    out,
                    "  - Images use different languages: {} ({}) vs {} ({})",
                    first.runtime, first.version, second.runtime, second.version
                );
            }
            LanguageComparison::SameVersion { runtime, version } => {
                let _ = writeln!(
                    out,
                    "  - Both images use the same {} version: {}",
                    runtime, version
                );
            }
            LanguageComparison::SameMajor { runtime, version } => {
                let _ = writeln!(
                    out,
                    "  - Both images use {} version {} (minor version may differ)",
                    runtime, version
                );
            }
            LanguageComparison::Newer {
                newer_name,
                runtime,
                newer_version,
                older_version,
            } => {
                let _ = writeln!(
                    out,
                    "  - Image {} uses newer {} ({} > {})",
                    self.paint(newer_name, GREEN),
                    runtime,
                    self.paint(newer_version, GREEN),
                    self.paint(older_version, RED),
                );
            }
        }

        out
    }

    fn render_technology(&self, tech: &ProjectTechnology) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "\nProject Detection Results");
        let _ = writeln!(out, "========================================");
        let _ = writeln!(out, "Language:        {}", tech.language);
        let _ = writeln!(out, "Framework:       {}", tech.framework);
        let _ = writeln!(out, "Package Manager: {}", tech.package_manager);
        let _ = writeln!(out, "Build Tool:      {}", tech.build_tool);
        let _ = writeln!(out, "Version:         {}", tech.version);

        let _ = writeln!(out, "\nConfig Files Found:");
        if tech.config_files.is_empty() {
            let _ = writeln!(out, "  (none)");
        } else {
            for file in &tech.config_files {
                let _ = writeln!(out, "  - {}", file);
            }
        }

        let _ = writeln!(out, "\nFile Extensions Distribution:");
        if tech.file_extensions.is_empty() {
            let _ = writeln!(out, "  (none)");
        } else {
            let mut sorted: Vec<(&String, &usize)> = tech.file_extensions.iter().collect();
            sorted.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
            for (ext, count) in sorted.into_iter().take(10) {
                let _ = writeln!(out, "  {}: {} files", ext, count);
            }
        }

        if !tech.dependencies.is_empty() {
            let _ = writeln!(out, "\nDependencies (sample):");
            for (dep, version) in tech.dependencies.iter().take(5) {
                let _ = writeln!(out, "  - {}: {}", dep, version);
            }
            if tech.dependencies.len() > 5 {
                let _ = writeln!(out, "  ... and {} more", tech.dependencies.len() - 5);
            }
        }

        let _ = writeln!(out, "========================================");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageMetadata;
    use crate::security::CisAnalyzer;

    fn formatter(format: OutputFormat) -> OutputFormatter {
        OutputFormatter::with_color(format, false)
    }

    fn sample_metadata() -> ImageMetadata {
        ImageMetadata {
            size_bytes: 56_900_000,
            layers: 7,
            env: vec!["NODE_VERSION=20.1.0".to_string()],
            os: "linux".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_human_report() {
        let report = ImageReport::build("myapp:1.0", &sample_metadata());
        let text = formatter(OutputFormat::Human).format_report(&report).unwrap();
        assert!(text.contains("Details of image myapp:1.0:"));
        assert!(text.contains("56.90 MB"));
        assert!(text.contains("Node.js 20.1.0"));
        assert!(!text.contains("\x1b["));
    }

    #[test]
    fn test_colored_report_has_ansi() {
        let report = ImageReport::build("myapp:1.0", &sample_metadata());
        let text = OutputFormatter::with_color(OutputFormat::Human, true)
            .format_report(&report)
            .unwrap();
        assert!(text.contains(GREEN));
    }

    #[test]
    fn test_json_report_round_trips() {
        let report = ImageReport::build("myapp:1.0", &sample_metadata());
        let json = formatter(OutputFormat::Json).format_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["size"], "56.90 MB");
    }

    #[test]
    fn test_yaml_report() {
        let report = ImageReport::build("myapp:1.0", &sample_metadata());
        let yaml = formatter(OutputFormat::Yaml).format_report(&report).unwrap();
        assert!(yaml.contains("name: myapp:1.0"));
    }

    #[test]
    fn test_human_cis_output() {
        let analyzer = CisAnalyzer::with_base_dir("/nonexistent");
        let results = analyzer.analyze("FROM node:18\n");
        let text = formatter(OutputFormat::Human)
            .format_cis_results(&results)
            .unwrap();
        assert!(text.contains("[PASS] CIS-1.1"));
        assert!(text.contains("[FAIL] CIS-4.1"));
        assert!(text.contains("Severity: HIGH"));
        assert!(text.contains("Security Score:"));
    }

    #[test]
    fn test_json_cis_output_has_score() {
        let analyzer = CisAnalyzer::with_base_dir("/nonexistent");
        let results = analyzer.analyze("FROM node:18\n");
        let json = formatter(OutputFormat::Json)
            .format_cis_results(&results)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["score"].is_number());
        assert_eq!(value["results"].as_array().unwrap().len(), 10);
    }

    #[test]
    fn test_human_comparison() {
        let small = sample_metadata();
        let big = ImageMetadata {
            size_bytes: 113_800_000,
            layers: 7,
            env: vec!["NODE_VERSION=18.0.0".to_string()],
            ..Default::default()
        };

        let comparison = ImageComparison::build("small:1", &small, "big:1", &big);
        let text = formatter(OutputFormat::Human)
            .format_comparison(&comparison)
            .unwrap();
        assert!(text.contains("50.00% smaller"));
        assert!(text.contains("same number of layers"));
        assert!(text.contains("uses newer Node.js"));
    }

    #[test]
    fn test_human_technology() {
        let tech = ProjectTechnology {
            language: "go".to_string(),
            package_manager: "go modules".to_string(),
            ..Default::default()
        };
        let text = formatter(OutputFormat::Human)
            .format_technology(&tech)
            .unwrap();
        assert!(text.contains("Language:        go"));
        assert!(text.contains("(none)"));
    }
}
