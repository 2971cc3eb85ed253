//! Dockerfile generation: LLM-backed with static template fallbacks.

pub mod generate;
pub mod templates;

pub use generate::{generate, generate_from_tree, GeneratedDockerfile, DOCKERFILE_NAME};
pub use templates::fallback_dockerfile;
