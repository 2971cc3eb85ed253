//! Integration tests for project technology detection
//!
//! These run the heuristic cascade and the LLM fallback over real
//! directory trees built in tempdirs, without a live provider.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use dockerlens::ai::mock::MockProvider;
use dockerlens::cli::{OutputFormat, OutputFormatter};
use dockerlens::detection::project::{detect, detect_smart};
use dockerlens::fs::ProjectSnapshot;

fn project(files: &[(&str, &str)]) -> (TempDir, ProjectSnapshot) {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
    let snapshot = ProjectSnapshot::scan(dir.path());
    (dir, snapshot)
}

#[test]
fn test_react_vite_project() {
    let (_dir, snapshot) = project(&[
        (
            "package.json",
            r#"{
                "name": "web",
                "dependencies": { "react": "^18.2.0", "react-dom": "^18.2.0" },
                "devDependencies": { "vite": "^5.0.0" },
                "scripts": { "build": "vite build" }
            }"#,
        ),
        ("yarn.lock", ""),
        ("src/App.jsx", "export default function App() {}"),
        ("src/main.jsx", ""),
    ]);

    let tech = detect(&snapshot);
    assert_eq!(tech.language, "javascript");
    assert_eq!(tech.framework, "react");
    assert_eq!(tech.package_manager, "yarn");
    assert_eq!(tech.build_tool, "vite");
    assert_eq!(tech.dependencies.get("react"), Some(&"^18.2.0".to_string()));
}

#[test]
fn test_go_gin_project() {
    let (_dir, snapshot) = project(&[
        (
            "go.mod",
            "module example.com/api\n\ngo 1.22\n\nrequire github.com/gin-gonic/gin v1.9.1\n",
        ),
        ("main.go", "package main"),
        ("handlers/users.go", "package handlers"),
    ]);

    let tech = detect(&snapshot);
    assert_eq!(tech.language, "go");
    assert_eq!(tech.framework, "gin");
    assert_eq!(tech.version, "1.22");
    assert_eq!(tech.package_manager, "go modules");
}

#[test]
fn test_django_project() {
    let (_dir, snapshot) = project(&[
        ("requirements.txt", "django==5.0\n"),
        ("manage.py", "#!/usr/bin/env python"),
        ("app/views.py", ""),
        ("app/models.py", ""),
    ]);

    let tech = detect(&snapshot);
    assert_eq!(tech.language, "python");
    assert_eq!(tech.framework, "django");
    assert_eq!(tech.package_manager, "pip");
}

#[test]
fn test_config_file_fallback_without_sources() {
    // No recognized source extensions; the manifest decides.
    let (_dir, snapshot) = project(&[("go.mod", "module example.com/x\n\ngo 1.21\n")]);

    let tech = detect(&snapshot);
    assert_eq!(tech.language, "go");
}

#[test]
fn test_unknown_project_stays_unknown() {
    let (_dir, snapshot) = project(&[("README.txt", "docs only")]);

    let tech = detect(&snapshot);
    assert!(tech.language_unknown());
}

#[tokio::test]
async fn test_smart_detection_consults_model_only_when_unknown() {
    let (_dir, snapshot) = project(&[
        ("go.mod", "module example.com/x\n\ngo 1.21\n"),
        ("main.go", "package main"),
    ]);

    // A recognized project never reaches the provider.
    let provider = MockProvider::with_response(r#"{"language":"cobol"}"#);
    let tech = detect_smart(&snapshot, &provider).await;
    assert_eq!(tech.language, "go");
    assert_eq!(provider.remaining(), 1);
}

#[tokio::test]
async fn test_smart_detection_fills_in_unknown() {
    let (_dir, snapshot) = project(&[("program.f90", "program hello\nend program\n")]);

    let provider = MockProvider::with_response(
        r#"{"language": "fortran", "framework": "", "buildTool": "make", "packageManager": ""}"#,
    );
    let tech = detect_smart(&snapshot, &provider).await;
    assert_eq!(tech.language, "fortran");
    assert_eq!(tech.build_tool, "make");
}

#[tokio::test]
async fn test_smart_detection_survives_provider_failure() {
    let (_dir, snapshot) = project(&[("program.f90", "")]);

    let provider = MockProvider::new();
    let tech = detect_smart(&snapshot, &provider).await;
    assert!(tech.language_unknown());
}

#[test]
fn test_technology_json_output_round_trips() {
    let (_dir, snapshot) = project(&[
        ("Cargo.toml", "[package]\nname = \"svc\"\n\n[dependencies]\naxum = \"0.7\"\n"),
        ("src/main.rs", "fn main() {}"),
    ]);

    let tech = detect(&snapshot);
    assert_eq!(tech.language, "rust");
    assert_eq!(tech.framework, "axum");

    let formatter = OutputFormatter::with_color(OutputFormat::Json, false);
    let rendered = formatter.format_technology(&tech).unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(value["language"], "rust");
    assert_eq!(value["framework"], "axum");
}

#[test]
fn test_scan_tolerates_missing_directory() {
    let snapshot = ProjectSnapshot::scan(Path::new("/definitely/not/here"));
    let tech = detect(&snapshot);
    assert!(tech.language_unknown());
}
