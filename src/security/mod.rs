//! Dockerfile security analysis based on the CIS Docker Benchmark
//!
//! Ten static rules run in fixed order over the raw Dockerfile text. Every
//! rule always runs; a missing FROM line is a rule failure, never a parse
//! error.

pub mod rules;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use rules::{
    CleanCacheRule, CombinedRunRule, DockerIgnoreRule, ExplicitTagRule, HealthcheckRule,
    MinimalPortExposureRule, MultiStageBuildRule, NoRootUserRule, OfficialBaseImageRule,
    OptimizedOrderRule,
};

/// Finding severity, reported only for failed rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of one rule check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CisResult {
    pub rule_id: &'static str,
    pub description: &'static str,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl CisResult {
    pub(crate) fn pass(rule_id: &'static str, description: &'static str) -> Self {
        Self {
            rule_id,
            description,
            passed: true,
            severity: None,
            message: String::new(),
        }
    }

    pub(crate) fn fail(
        rule_id: &'static str,
        description: &'static str,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id,
            description,
            passed: false,
            severity: Some(severity),
            message: message.into(),
        }
    }
}

/// One independent check against Dockerfile text.
pub trait CisRule: Send + Sync {
    fn check(&self, dockerfile: &str) -> CisResult;
}

/// Runs the full rule set in registration order.
pub struct CisAnalyzer {
    rules: Vec<Box<dyn CisRule>>,
}

impl CisAnalyzer {
    /// Analyzer with the `.dockerignore` check rooted at the current
    /// working directory.
    pub fn new() -> Self {
        Self::with_base_dir(PathBuf::from("."))
    }

    /// Analyzer with the `.dockerignore` check rooted at `base_dir`.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            rules: vec![
                Box::new(OfficialBaseImageRule),
                Box::new(ExplicitTagRule),
                Box::new(NoRootUserRule),
                Box::new(CleanCacheRule),
                Box::new(HealthcheckRule),
                Box::new(DockerIgnoreRule::new(base_dir)),
                Box::new(MinimalPortExposureRule),
                Box::new(MultiStageBuildRule),
                Box::new(CombinedRunRule),
                Box::new(OptimizedOrderRule),
            ],
        }
    }

    /// Checks every rule; always returns one result per registered rule.
    pub fn analyze(&self, dockerfile: &str) -> Vec<CisResult> {
        self.rules
            .iter()
            .map(|rule| rule.check(dockerfile))
            .collect()
    }

    /// Analyzes a Dockerfile on disk.
    pub fn analyze_file(&self, path: &Path) -> std::io::Result<Vec<CisResult>> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.analyze(&content))
    }
}

impl Default for CisAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Integer percentage of passed rules, rounded toward zero.
pub fn security_score(results: &[CisResult]) -> u32 {
    if results.is_empty() {
        return 0;
    }
    let passed = results.iter().filter(|r| r.passed).count() as u32;
    passed * 100 / results.len() as u32
}
