//! Project filesystem snapshot
//!
//! Builds the read-only view of a local project that technology detection
//! runs over: root-level file names, a recursive file-extension census, and
//! the set of known configuration files present. Build artifact and vendor
//! directories are pruned at the directory level, hidden files are skipped.

use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directories never descended into during the extension census.
const IGNORED_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "vendor",
    "venv",
    ".venv",
    "__pycache__",
    "dist",
    "build",
    "target",
    ".next",
    ".nuxt",
];

/// Catalog of configuration filenames checked for existence at the root.
const KNOWN_CONFIG_FILES: &[&str] = &[
    // Node.js
    "package.json",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "tsconfig.json",
    "webpack.config.js",
    "vite.config.js",
    "vite.config.ts",
    "next.config.js",
    "nuxt.config.js",
    "svelte.config.js",
    // Python
    "requirements.txt",
    "Pipfile",
    "Pipfile.lock",
    "pyproject.toml",
    "setup.py",
    "poetry.lock",
    "conda.yml",
    "environment.yml",
    // Go
    "go.mod",
    "go.sum",
    // Java
    "pom.xml",
    "build.gradle",
    "build.gradle.kts",
    "settings.gradle",
    // Rust
    "Cargo.toml",
    "Cargo.lock",
    // PHP
    "composer.json",
    "composer.lock",
    // Ruby
    "Gemfile",
    "Gemfile.lock",
    // .NET
    "packages.config",
    // Docker
    "Dockerfile",
    "docker-compose.yml",
    "docker-compose.yaml",
    // Others
    "Makefile",
    "CMakeLists.txt",
];

/// Directories excluded from the rendered project tree sent to the LLM.
const TREE_IGNORED: &[&str] = &[
    ".git",
    "node_modules",
    "vendor",
    "dist",
    "build",
    ".idea",
    ".vscode",
    ".DS_Store",
];

/// Snapshot of a project directory, taken once per invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    /// Root the snapshot was taken from
    pub root: PathBuf,
    /// Names of regular files directly under the root
    pub root_files: Vec<String>,
    /// Count of files per lowercased extension (with leading dot)
    pub extension_counts: BTreeMap<String, usize>,
    /// Known config files present at the root, in catalog order
    pub config_files: Vec<String>,
}

impl ProjectSnapshot {
    /// Walks `root` and captures the snapshot.
    ///
    /// Unreadable entries are skipped rather than treated as errors; an
    /// unreadable root simply yields an empty snapshot.
    pub fn scan(root: &Path) -> Self {
        let mut snapshot = Self {
            root: root.to_path_buf(),
            ..Default::default()
        };

        snapshot.root_files = list_root_files(root);
        snapshot.extension_counts = count_extensions(root);
        snapshot.config_files = KNOWN_CONFIG_FILES
            .iter()
            .filter(|name| root.join(name).is_file())
            .map(|name| name.to_string())
            .collect();

        debug!(
            root = %root.display(),
            files = snapshot.root_files.len(),
            configs = snapshot.config_files.len(),
            "project snapshot captured"
        );

        snapshot
    }

    /// Snapshot of the current working directory.
    pub fn scan_current_dir() -> Self {
        Self::scan(Path::new("."))
    }

    /// Whether a file with this name exists at the snapshot root.
    pub fn has_file(&self, name: &str) -> bool {
        self.root.join(name).is_file()
    }

    /// Reads a root-level file as UTF-8. Missing files and read failures
    /// are reported as absence, not errors.
    pub fn read_file(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.root.join(name)).ok()
    }

    /// Root-level `*.csproj` files, sorted by name.
    pub fn csproj_files(&self) -> Vec<String> {
        let mut files: Vec<String> = self
            .root_files
            .iter()
            .filter(|name| name.ends_with(".csproj"))
            .cloned()
            .collect();
        files.sort();
        files
    }
}

fn list_root_files(root: &Path) -> Vec<String> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut files: Vec<String> = entries
        .flatten()
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    files
}

fn count_extensions(root: &Path) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();

    let walker = WalkBuilder::new(root)
        .hidden(true)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false)
        .filter_entry(|entry| {
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if is_dir {
                let name = entry.file_name().to_string_lossy();
                !IGNORED_DIRS.contains(&name.as_ref())
            } else {
                true
            }
        })
        .build();

    for entry in walker.flatten() {
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        if let Some(ext) = entry.path().extension() {
            let key = format!(".{}", ext.to_string_lossy().to_lowercase());
            *counts.entry(key).or_insert(0) += 1;
        }
    }

    counts
}

/// Renders the project directory as an indented tree with box-drawing
/// connectors, for use as LLM prompt context.
pub fn render_project_tree(root: &Path) -> std::io::Result<String> {
    let mut out = String::new();
    walk_tree(root, "", &mut out)?;
    Ok(out)
}

fn walk_tree(dir: &Path, prefix: &str, out: &mut String) -> std::io::Result<()> {
    let mut entries: Vec<_> = fs::read_dir(dir)?
        .flatten()
        .filter(|entry| {
            let name = entry.file_name();
            !TREE_IGNORED.contains(&name.to_string_lossy().as_ref())
        })
        .collect();
    entries.sort_by_key(|entry| entry.file_name());

    let count = entries.len();
    for (i, entry) in entries.into_iter().enumerate() {
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_last = i == count - 1;
        let connector = if is_last { "└── " } else { "├── " };

        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(&name);
        out.push('\n');

        if entry.file_type()?.is_dir() {
            let child_prefix = if is_last {
                format!("{}    ", prefix)
            } else {
                format!("{}│   ", prefix)
            };
            walk_tree(&entry.path(), &child_prefix, out)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let mut f = File::create(path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_scan_counts_extensions() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "main.go", "package main");
        write_file(tmp.path(), "util.go", "package main");
        write_file(tmp.path(), "README.md", "# readme");
        write_file(tmp.path(), "src/helper.GO", "package main");

        let snapshot = ProjectSnapshot::scan(tmp.path());
        assert_eq!(snapshot.extension_counts.get(".go"), Some(&3));
        assert_eq!(snapshot.extension_counts.get(".md"), Some(&1));
    }

    #[test]
    fn test_scan_prunes_ignored_dirs() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "index.js", "");
        write_file(tmp.path(), "node_modules/dep/index.js", "");
        write_file(tmp.path(), "dist/bundle.js", "");

        let snapshot = ProjectSnapshot::scan(tmp.path());
        assert_eq!(snapshot.extension_counts.get(".js"), Some(&1));
    }

    #[test]
    fn test_scan_skips_hidden_files() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "app.py", "");
        write_file(tmp.path(), ".hidden.py", "");

        let snapshot = ProjectSnapshot::scan(tmp.path());
        assert_eq!(snapshot.extension_counts.get(".py"), Some(&1));
    }

    #[test]
    fn test_config_files_in_catalog_order() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "go.mod", "module example.com/app");
        write_file(tmp.path(), "package.json", "{}");
        write_file(tmp.path(), "Dockerfile", "FROM scratch");

        let snapshot = ProjectSnapshot::scan(tmp.path());
        assert_eq!(
            snapshot.config_files,
            vec!["package.json", "go.mod", "Dockerfile"]
        );
    }

    #[test]
    fn test_read_file_absence_is_none() {
        let tmp = TempDir::new().unwrap();
        let snapshot = ProjectSnapshot::scan(tmp.path());
        assert!(snapshot.read_file("missing.txt").is_none());
    }

    #[test]
    fn test_csproj_glob() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "Web.csproj", "<Project/>");
        write_file(tmp.path(), "Api.csproj", "<Project/>");

        let snapshot = ProjectSnapshot::scan(tmp.path());
        assert_eq!(snapshot.csproj_files(), vec!["Api.csproj", "Web.csproj"]);
    }

    #[test]
    fn test_render_project_tree() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "a.txt", "");
        write_file(tmp.path(), "src/main.rs", "");
        write_file(tmp.path(), "node_modules/x.js", "");

        let tree = render_project_tree(tmp.path()).unwrap();
        assert!(tree.contains("├── a.txt") || tree.contains("└── a.txt"));
        assert!(tree.contains("main.rs"));
        assert!(!tree.contains("node_modules"));
    }
}
