//! Prompt construction for the LLM-assisted paths
//!
//! All prompt text lives here so the callers stay focused on flow control.
//! The image context block filters out environment variables that look like
//! secrets before anything leaves the process.

use std::fmt::Write;

use crate::detection::language::detect_primary_language;
use crate::image::ImageMetadata;

/// System prompt for Dockerfile generation requests.
pub const DOCKERFILE_SYSTEM_PROMPT: &str =
    "You are a Docker expert. Respond only with Dockerfile content, no explanations.";

/// System prompt for project technology detection requests.
pub const DETECTION_SYSTEM_PROMPT: &str =
    "You are a project analysis expert. Always respond with valid JSON only.";

/// Builds the textual context block describing an image.
///
/// Environment variables whose names mention PASSWORD, SECRET, or TOKEN are
/// omitted.
pub fn image_context(metadata: &ImageMetadata, image_name: &str) -> String {
    let mut ctx = String::new();

    let _ = writeln!(ctx, "Image Name: {}", image_name);
    let _ = writeln!(ctx, "Tags: {:?}", metadata.repo_tags);
    let _ = writeln!(ctx, "Size: {}", metadata.size_string());
    let _ = writeln!(ctx, "Layers: {}", metadata.layers);
    let _ = writeln!(ctx, "OS: {}", metadata.os);
    let _ = writeln!(ctx, "Architecture: {}", metadata.architecture);

    match detect_primary_language(metadata) {
        Some(info) => {
            let _ = writeln!(ctx, "Language: {} {}", info.runtime, info.version);
        }
        None => {
            let _ = writeln!(ctx, "Language: None detected");
        }
    }

    let _ = writeln!(ctx, "\nEnvironment Variables:");
    for var in &metadata.env {
        let upper = var.to_uppercase();
        if upper.contains("PASSWORD") || upper.contains("SECRET") || upper.contains("TOKEN") {
            continue;
        }
        let _ = writeln!(ctx, "  - {}", var);
    }

    if !metadata.cmd.is_empty() {
        let _ = writeln!(ctx, "\nCmd: {:?}", metadata.cmd);
    }
    if !metadata.entrypoint.is_empty() {
        let _ = writeln!(ctx, "Entrypoint: {:?}", metadata.entrypoint);
    }
    if !metadata.working_dir.is_empty() {
        let _ = writeln!(ctx, "Working Directory: {}", metadata.working_dir);
    }

    if !metadata.exposed_ports.is_empty() {
        let _ = writeln!(ctx, "\nExposed Ports:");
        for port in &metadata.exposed_ports {
            let _ = writeln!(ctx, "  - {}", port);
        }
    }

    if metadata.user.is_empty() {
        let _ = writeln!(ctx, "\nUser: root (running as root)");
    } else {
        let _ = writeln!(ctx, "\nUser: {}", metadata.user);
    }

    ctx
}

/// Prompt asking for a scored analysis of one image.
pub fn image_analysis_prompt(image_context: &str) -> String {
    format!(
        "You are a Docker expert analyzing container images for security, optimization, and best practices.\n\
         \n\
         Analyze the following Docker image and provide:\n\
         \n\
         1. Security Score (0-100): Evaluate security aspects like running as root, exposed ports, base image, etc.\n\
         2. Optimization Score (0-100): Evaluate size, layers, and efficiency.\n\
         3. Best Practices Score (0-100): Evaluate adherence to Docker best practices.\n\
         4. Top 3-5 Security Issues (if any)\n\
         5. Top 3-5 Optimization Tips\n\
         6. Top 3-5 General Recommendations\n\
         7. Brief Summary (2-3 sentences)\n\
         \n\
         Image Details:\n\
         {image_context}\n\
         \n\
         Respond in the following format:\n\
         SECURITY_SCORE: <number>\n\
         OPTIMIZATION_SCORE: <number>\n\
         BEST_PRACTICES_SCORE: <number>\n\
         \n\
         SECURITY_ISSUES:\n\
         - <issue 1>\n\
         - <issue 2>\n\
         ...\n\
         \n\
         OPTIMIZATION_TIPS:\n\
         - <tip 1>\n\
         - <tip 2>\n\
         ...\n\
         \n\
         RECOMMENDATIONS:\n\
         - <recommendation 1>\n\
         - <recommendation 2>\n\
         ...\n\
         \n\
         SUMMARY:\n\
         <summary text>\n"
    )
}

/// Prompt asking for a side-by-side comparison of two images.
pub fn image_comparison_prompt(context1: &str, context2: &str) -> String {
    format!(
        "You are a Docker expert comparing two container images.\n\
         \n\
         Compare these images and provide:\n\
         1. Which image is better overall and why\n\
         2. Key differences between them\n\
         3. Specific recommendations for each image\n\
         \n\
         Image 1:\n\
         {context1}\n\
         \n\
         Image 2:\n\
         {context2}\n\
         \n\
         Provide a clear, concise comparison focusing on security, optimization, and best practices.\n"
    )
}

/// Prompt asking for actionable Dockerfile optimizations for an image.
pub fn optimization_prompt(image_context: &str) -> String {
    format!(
        "You are a Docker optimization expert.\n\
         \n\
         Analyze this image and provide 5-10 specific, actionable Dockerfile improvements.\n\
         Focus on: multi-stage builds, layer optimization, security, and size reduction.\n\
         \n\
         Image Details:\n\
         {image_context}\n\
         \n\
         Provide each optimization as a bullet point with:\n\
         - The specific change to make\n\
         - Why it helps\n\
         - Example Dockerfile snippet if applicable\n\
         \n\
         Format:\n\
         - Optimization 1: <description>\n\
         - Optimization 2: <description>\n\
         ...\n"
    )
}

/// Prompt asking for a production Dockerfile from detected project facts.
///
/// `tech_json` is the serialized `ProjectTechnology` record.
pub fn dockerfile_generation_prompt(tech_json: &str, ignore_comments: bool) -> String {
    let comment_instruction = if ignore_comments {
        "- Do not include any comments in the Dockerfile"
    } else {
        "- Each instruction must be preceded by a comment explaining its purpose\n\
         - Comments must be on their own lines, above their related instructions"
    };

    format!(
        "Generate a production-ready optimized Dockerfile for a project with the following characteristics:\n\
         {tech_json}\n\
         \n\
         Technical requirements:\n\
         - Detect the primary language and framework from the provided information\n\
         - Use appropriate base image for the detected language/framework:\n\
         \x20 * Node.js projects: node:alpine or node:lts-alpine\n\
         \x20 * Python projects: python:3.12-slim or python:alpine\n\
         \x20 * Go projects: golang:alpine for build, alpine for runtime\n\
         \x20 * Java or Spring Boot projects: eclipse-temurin:21-jre-alpine\n\
         \x20 * Rust projects: rust:alpine for build, alpine for runtime\n\
         \x20 * PHP projects: php:8.2-fpm-alpine or php:apache\n\
         \x20 * Ruby projects: ruby:3.2-alpine\n\
         \x20 * .NET projects: mcr.microsoft.com/dotnet/sdk for build, runtime for production\n\
         - The Dockerfile must be optimized for production use\n\
         - Use multi-stage builds to optimize the final image size whenever possible\n\
         - Try to keep the number of layers as low as possible\n\
         - Follow security best practices (non-root user, minimal base image)\n\
         - Include only necessary files (use .dockerignore patterns in comments if helpful)\n\
         - Include Health Check instruction\n\
         - Make sure the application starts correctly\n\
         - Copy all necessary configuration and dependency files\n\
         - Install the correct package manager if needed (npm, yarn, pnpm, pip, poetry, cargo, composer, etc.)\n\
         - Expose appropriate ports based on the framework\n\
         - At the end of the Dockerfile, add a comment with the \"docker run\" example command to start the application\n\
         \n\
         Formatting requirements:\n\
         - Return ONLY the raw Dockerfile content without any markdown formatting, code blocks, or explanations\n\
         - Start directly with the FROM instruction or the comment block\n\
         - Do not include any markdown backticks or formatting\n\
         {comment_instruction}\n\
         \n\
         Remember:\n\
         Respond with only the raw Dockerfile content, starting with FROM (or the comment block) and no other text or formatting."
    )
}

/// Prompt asking for a Dockerfile from a rendered project tree.
pub fn dockerfile_from_tree_prompt(project_tree: &str, ignore_comments: bool) -> String {
    let comment_rule = if ignore_comments {
        "Do not include comments."
    } else {
        "Include explanatory comments."
    };

    format!(
        "You are a Docker expert.\n\
         \n\
         Generate a production-ready optimized Dockerfile for a project with the following project structure:\n\
         {project_tree}\n\
         \n\
         Technical requirements:\n\
         - Detect the primary language and framework from the provided information\n\
         - Use multi-stage builds to optimize the final image size whenever possible\n\
         - Try to keep the number of layers as low as possible\n\
         - Follow security best practices (non-root user, minimal base image)\n\
         - Make sure the application starts correctly\n\
         - Copy all necessary configuration and dependency files\n\
         - Expose appropriate ports based on the framework\n\
         - At the end of the Dockerfile, add a comment with the \"docker run\" example command to start the application\n\
         \n\
         Formatting requirements:\n\
         - Return ONLY the raw Dockerfile content without any markdown formatting, code blocks, or explanations\n\
         - Start directly with the FROM instruction or the comment block\n\
         - Do not include any markdown backticks or formatting\n\
         {comment_rule}\n\
         \n\
         Remember:\n\
         Respond with only the raw Dockerfile content, starting with FROM (or the comment block) and no other text or formatting."
    )
}

/// Prompt asking the model to identify a project's technology.
///
/// `context_json` carries root files, config files, and extension counts.
/// The response contract is a strict JSON object with lowercase values.
pub fn project_detection_prompt(context_json: &str) -> String {
    format!(
        "Analyze the following project structure and identify:\n\
         1. Primary programming language\n\
         2. Framework (if any)\n\
         3. Package manager\n\
         4. Build tool (if any)\n\
         \n\
         Project information:\n\
         {context_json}\n\
         \n\
         Respond ONLY with a JSON object in this exact format:\n\
         {{\n\
         \x20 \"language\": \"language-name\",\n\
         \x20 \"framework\": \"framework-name\",\n\
         \x20 \"packageManager\": \"package-manager-name\",\n\
         \x20 \"buildTool\": \"build-tool-name\"\n\
         }}\n\
         \n\
         Use lowercase for all values. If something is not detected, use empty string."
    )
}
