pub mod language;
pub mod project;
pub mod version;

pub use language::{detect_primary_language, LanguageInfo, Runtime};
pub use project::ProjectTechnology;
pub use version::Tier;
