//! LLM integration
//!
//! Provider abstraction, prompt construction, and the higher-level analysis
//! flows built on top of them.

pub mod analyzer;
pub mod genai;
pub mod mock;
pub mod prompt;
pub mod provider;

pub use analyzer::{AiAnalyzer, ImageAnalysisResult};
pub use genai::GenAiProvider;
pub use provider::{AiProvider, Provider, ProviderError};
