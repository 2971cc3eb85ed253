pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{AnalyzeArgs, CliArgs, Commands, CompareArgs, CreateArgs, DetectArgs};
pub use output::{OutputFormat, OutputFormatter};
