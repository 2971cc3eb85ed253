//! End-to-end Dockerfile linting through the CIS analyzer
//!
//! These tests run realistic Dockerfiles through the full rule set and
//! check both the per-rule outcomes and the rolled-up score, including the
//! file-based entry point and the `.dockerignore` check against a project
//! directory.

use std::fs;
use tempfile::TempDir;

use dockerlens::cli::{OutputFormat, OutputFormatter};
use dockerlens::security::{security_score, CisAnalyzer, Severity};

const CLEAN_DOCKERFILE: &str = "\
FROM node:18.19-alpine AS build
WORKDIR /app
COPY package.json package-lock.json ./
RUN npm ci && npm cache clean --force && apk --no-cache add curl
COPY . .
RUN npm run build && npm prune --omit=dev

FROM node:18.19-alpine
WORKDIR /app
COPY --from=build /app/dist ./dist
USER node
EXPOSE 3000
HEALTHCHECK CMD curl -f http://localhost:3000/health || exit 1
CMD [\"node\", \"dist/main.js\"]
";

const SLOPPY_DOCKERFILE: &str = "\
FROM ubuntu:latest
RUN apt-get update
RUN apt-get install -y python3
COPY . /app
RUN pip install -r /app/requirements.txt
EXPOSE 80
EXPOSE 443
EXPOSE 8080
CMD [\"python3\", \"/app/main.py\"]
";

fn project_with_dockerfile(dockerfile: &str, with_dockerignore: bool) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Dockerfile"), dockerfile).unwrap();
    if with_dockerignore {
        fs::write(dir.path().join(".dockerignore"), "node_modules\n.git\n").unwrap();
    }
    dir
}

#[test]
fn test_clean_dockerfile_scores_full() {
    let dir = project_with_dockerfile(CLEAN_DOCKERFILE, true);
    let analyzer = CisAnalyzer::with_base_dir(dir.path());

    let results = analyzer.analyze(CLEAN_DOCKERFILE);
    assert_eq!(results.len(), 10);

    let failed: Vec<&str> = results
        .iter()
        .filter(|r| !r.passed)
        .map(|r| r.rule_id)
        .collect();
    assert!(failed.is_empty(), "unexpected failures: {:?}", failed);
    assert_eq!(security_score(&results), 100);
}

#[test]
fn test_sloppy_dockerfile_fails_expected_rules() {
    let dir = project_with_dockerfile(SLOPPY_DOCKERFILE, false);
    let analyzer = CisAnalyzer::with_base_dir(dir.path());

    let results = analyzer.analyze(SLOPPY_DOCKERFILE);

    let failed: Vec<&str> = results
        .iter()
        .filter(|r| !r.passed)
        .map(|r| r.rule_id)
        .collect();

    // latest tag, root user, no cache cleanup, no healthcheck, no
    // .dockerignore, three exposed ports, split RUNs, single stage
    assert!(failed.contains(&"CIS-1.2"));
    assert!(failed.contains(&"CIS-4.1"));
    assert!(failed.contains(&"CIS-4.6"));
    assert!(failed.contains(&"CIS-5.1"));
    assert!(failed.contains(&"CIS-5.2"));
    assert!(failed.contains(&"CIS-6.1"));
    assert!(failed.contains(&"CIS-7.1"));
    assert!(failed.contains(&"CIS-8.1"));

    let score = security_score(&results);
    assert!(score < 50, "score too generous: {}", score);
}

#[test]
fn test_missing_from_is_high_severity() {
    let results = CisAnalyzer::new().analyze("RUN echo hello\n");

    let base = results.iter().find(|r| r.rule_id == "CIS-1.1").unwrap();
    assert!(!base.passed);
    assert_eq!(base.severity, Some(Severity::High));
    assert!(base.message.contains("No FROM instruction"));
}

#[test]
fn test_analyze_file_reads_from_disk() {
    let dir = project_with_dockerfile(CLEAN_DOCKERFILE, true);
    let analyzer = CisAnalyzer::with_base_dir(dir.path());

    let results = analyzer.analyze_file(&dir.path().join("Dockerfile")).unwrap();
    assert_eq!(security_score(&results), 100);
}

#[test]
fn test_analyze_file_missing_path_errors() {
    let analyzer = CisAnalyzer::new();
    assert!(analyzer
        .analyze_file(std::path::Path::new("/nonexistent/Dockerfile"))
        .is_err());
}

#[test]
fn test_json_output_includes_score() {
    let results = CisAnalyzer::new().analyze(SLOPPY_DOCKERFILE);
    let formatter = OutputFormatter::with_color(OutputFormat::Json, false);

    let rendered = formatter.format_cis_results(&results).unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(value["results"].as_array().unwrap().len(), 10);
    assert_eq!(
        value["score"].as_u64().unwrap(),
        security_score(&results) as u64
    );
}

#[test]
fn test_human_output_lists_every_rule() {
    let results = CisAnalyzer::new().analyze(SLOPPY_DOCKERFILE);
    let formatter = OutputFormatter::with_color(OutputFormat::Human, false);

    let rendered = formatter.format_cis_results(&results).unwrap();
    for result in &results {
        assert!(rendered.contains(result.rule_id), "missing {}", result.rule_id);
    }
    assert!(rendered.contains("Security Score:"));
}
