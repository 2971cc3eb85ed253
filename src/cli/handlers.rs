//! Subcommand handlers
//!
//! Each handler owns the full flow for one subcommand and returns a process
//! exit code. User-facing results go to stdout through the formatter;
//! diagnostics go to the log.

use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use super::commands::{AnalyzeArgs, CompareArgs, CreateArgs, DetectArgs};
use super::output::OutputFormatter;
use crate::config::DockerlensConfig;
use crate::detection::project;
use crate::dockerfile::generate::{
    self, GeneratedDockerfile, DOCKERFILE_NAME, DOCKERIGNORE_NAME,
};
use crate::fs::ProjectSnapshot;
use crate::image::compare::ImageComparison;
use crate::image::inspect::inspect_image;
use crate::image::report::ImageReport;
use crate::security::CisAnalyzer;

pub async fn handle_analyze(args: &AnalyzeArgs) -> i32 {
    let formatter = OutputFormatter::new(args.format.into());

    if args.dockerfile {
        return analyze_dockerfile(Path::new(&args.target), &formatter);
    }

    info!(image = %args.target, "analyzing image");
    let metadata = match inspect_image(&args.target).await {
        Ok(metadata) => metadata,
        Err(e) => {
            error!("Failed to inspect image: {}", e);
            return 1;
        }
    };

    let report = ImageReport::build(&args.target, &metadata);
    print_or_fail(formatter.format_report(&report))
}

fn analyze_dockerfile(path: &Path, formatter: &OutputFormatter) -> i32 {
    info!(path = %path.display(), "analyzing Dockerfile");

    let base_dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let analyzer = match base_dir {
        Some(dir) => CisAnalyzer::with_base_dir(dir),
        None => CisAnalyzer::new(),
    };

    let results = match analyzer.analyze_file(path) {
        Ok(results) => results,
        Err(e) => {
            error!("Failed to read Dockerfile {}: {}", path.display(), e);
            return 1;
        }
    };

    print_or_fail(formatter.format_cis_results(&results))
}

pub async fn handle_compare(args: &CompareArgs) -> i32 {
    let formatter = OutputFormatter::new(args.format.into());

    info!(image1 = %args.image1, image2 = %args.image2, "comparing images");

    let metadata1 = match inspect_image(&args.image1).await {
        Ok(metadata) => metadata,
        Err(e) => {
            error!("Failed to inspect {}: {}", args.image1, e);
            return 1;
        }
    };
    let metadata2 = match inspect_image(&args.image2).await {
        Ok(metadata) => metadata,
        Err(e) => {
            error!("Failed to inspect {}: {}", args.image2, e);
            return 1;
        }
    };

    let comparison = ImageComparison::build(&args.image1, &metadata1, &args.image2, &metadata2);
    print_or_fail(formatter.format_comparison(&comparison))
}

pub async fn handle_create(args: &CreateArgs) -> i32 {
    let snapshot = ProjectSnapshot::scan_current_dir();

    let generated = if args.ai {
        let config = DockerlensConfig::default();
        if let Err(e) = config.validate() {
            error!("Configuration error: {}", e);
            return 1;
        }
        debug!(provider = %config.provider, model = %config.model, "using LLM generation");

        let provider = config.create_provider();
        if args.from_tree {
            generate::generate_from_tree(&snapshot, provider.as_ref(), args.ignore_comments).await
        } else {
            generate::generate(&snapshot, provider.as_ref(), args.ignore_comments).await
        }
    } else {
        generate::generate_offline(&snapshot, args.ignore_comments)
    };

    write_and_report(&generated, args.name.as_deref())
}

fn write_and_report(generated: &GeneratedDockerfile, image_name: Option<&str>) -> i32 {
    if let Err(e) = generate::write_outputs(Path::new("."), &generated.content) {
        error!("Failed to write output files: {}", e);
        return 1;
    }

    println!("Detected: {}", generated.technology.summary());
    if generated.from_template {
        println!("Generated {} from a static template.", DOCKERFILE_NAME);
    } else {
        println!("Generated {} with AI assistance.", DOCKERFILE_NAME);
    }
    println!("Created {} and {}.", DOCKERFILE_NAME, DOCKERIGNORE_NAME);

    if let Some(name) = image_name {
        println!(
            "\nTo build the image, run:\n  docker build -f {} -t {} .",
            DOCKERFILE_NAME, name
        );
    }

    0
}

pub async fn handle_detect(args: &DetectArgs) -> i32 {
    let formatter = OutputFormatter::new(args.format.into());

    let root = args.path.clone().unwrap_or_else(|| PathBuf::from("."));
    if !root.is_dir() {
        error!("Project path is not a directory: {}", root.display());
        return 1;
    }

    let snapshot = ProjectSnapshot::scan(&root);

    let tech = if args.smart {
        let config = DockerlensConfig::default();
        if let Err(e) = config.validate() {
            error!("Configuration error: {}", e);
            return 1;
        }
        let provider = config.create_provider();
        project::detect_smart(&snapshot, provider.as_ref()).await
    } else {
        project::detect(&snapshot)
    };

    print_or_fail(formatter.format_technology(&tech))
}

fn print_or_fail(formatted: anyhow::Result<String>) -> i32 {
    match formatted {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            error!("Failed to format output: {}", e);
            1
        }
    }
}
