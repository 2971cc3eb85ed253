use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Docker image and Dockerfile analysis with AI-assisted generation
#[derive(Parser, Debug)]
#[command(
    name = "dockerlens",
    about = "Analyze Docker images and Dockerfiles, and generate optimized Dockerfiles",
    version,
    author,
    long_about = "dockerlens inspects Docker images for size, layering, and runtime freshness, \
                  lints Dockerfiles against the CIS Docker Benchmark, detects project \
                  technology from the file tree, and generates production Dockerfiles with \
                  an optional LLM assist (OpenAI, Gemini, Claude, Ollama)."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Verbose output (debug logging)")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Analyze a Docker image or a Dockerfile",
        long_about = "Analyzes a Docker image (size, layers, language runtime, improvement \
                      suggestions) or, with --dockerfile, lints a Dockerfile against the \
                      CIS Docker Benchmark.\n\n\
                      Examples:\n  \
                      dockerlens analyze myapp:1.0\n  \
                      dockerlens analyze --dockerfile ./Dockerfile\n  \
                      dockerlens analyze myapp:1.0 --format json"
    )]
    Analyze(AnalyzeArgs),

    #[command(
        about = "Compare two Docker images",
        long_about = "Compares two images by size, layer count, and detected language \
                      runtime.\n\n\
                      Examples:\n  \
                      dockerlens compare myapp:1.0 myapp:2.0\n  \
                      dockerlens compare myapp:1.0 myapp:2.0 --format yaml"
    )]
    Compare(CompareArgs),

    #[command(
        about = "Generate a Dockerfile (and .dockerignore) for the current project",
        long_about = "Detects the project technology and writes Dockerlens.Dockerfile plus a \
                      .dockerignore. By default a static template is used; with --ai, the \
                      configured LLM generates the Dockerfile and the template is kept as a \
                      fallback.\n\n\
                      Examples:\n  \
                      dockerlens create\n  \
                      dockerlens create --ai\n  \
                      dockerlens create --ai -n myapp:1.0 --ignore-comments"
    )]
    Create(CreateArgs),

    #[command(
        about = "Detect the technology of a source project",
        long_about = "Inspects the file tree and manifest files to identify language, \
                      framework, package manager, and build tool. With --smart, an LLM is \
                      consulted when the heuristics come up empty.\n\n\
                      Examples:\n  \
                      dockerlens detect\n  \
                      dockerlens detect /path/to/project --smart\n  \
                      dockerlens detect --format json"
    )]
    Detect(DetectArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    #[arg(value_name = "TARGET", help = "Image name/ID, or Dockerfile path with --dockerfile")]
    pub target: String,

    #[arg(
        short = 'd',
        long,
        help = "Analyze a Dockerfile instead of an image"
    )]
    pub dockerfile: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct CompareArgs {
    #[arg(value_name = "IMAGE1")]
    pub image1: String,

    #[arg(value_name = "IMAGE2")]
    pub image2: String,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct CreateArgs {
    #[arg(
        short = 'n',
        long = "name",
        value_name = "IMAGE",
        help = "Image name to suggest in the build command"
    )]
    pub name: Option<String>,

    #[arg(
        short = 'i',
        long = "ignore-comments",
        help = "Do not include comments in the generated Dockerfile"
    )]
    pub ignore_comments: bool,

    #[arg(long, help = "Use the configured LLM to generate the Dockerfile")]
    pub ai: bool,

    #[arg(
        long,
        requires = "ai",
        help = "Send the rendered project tree as LLM context instead of the detection record"
    )]
    pub from_tree: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to the project (defaults to current directory)"
    )]
    pub path: Option<PathBuf>,

    #[arg(long, help = "Ask the configured LLM when heuristics fail")]
    pub smart: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
