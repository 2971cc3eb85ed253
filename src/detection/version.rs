//! Runtime version freshness classification
//!
//! Buckets a detected runtime version into a health tier using fixed
//! per-runtime thresholds. Sentinel versions (a runtime identified without a
//! precise number) are checked before any numeric parsing.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::language::Runtime;

/// Sentinel version for a runtime identified through indirect signals
/// (e.g. `JAVA_HOME` without a parsable version in the path).
pub const VERSION_DETECTED: &str = "detected";

/// Sentinel version for a runtime identified only by its start command.
pub const VERSION_UNKNOWN: &str = "unknown";

/// Sentinel version for a statically compiled binary (Go heuristic).
pub const VERSION_COMPILED: &str = "compiled";

/// Freshness tier of a detected runtime version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Current, supported version
    Success,
    /// Approaching end of life, or version imprecisely known
    Warning,
    /// Outdated version with potential security exposure
    Error,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Success => write!(f, "success"),
            Tier::Warning => write!(f, "warning"),
            Tier::Error => write!(f, "error"),
        }
    }
}

/// Classifies a version string for the given runtime into a [`Tier`].
///
/// Sentinel versions short-circuit before numeric parsing: `detected` and
/// `unknown` classify as `Warning` for every runtime except Go, where all
/// sentinels (including `compiled`) classify as `Success`. Unparsable
/// numeric tokens degrade to `0`, which lands in the lowest bucket.
pub fn classify(runtime: Runtime, version: &str) -> Tier {
    match runtime {
        Runtime::NodeJs => classify_nodejs(version),
        Runtime::Python => classify_python(version),
        Runtime::Java => classify_java(version),
        Runtime::Go => classify_go(version),
        Runtime::Php => classify_php(version),
        Runtime::Ruby => classify_ruby(version),
        Runtime::DotNet => classify_dotnet(version),
        // Any version signal at all counts as current for Rust.
        Runtime::Rust => Tier::Success,
    }
}

fn is_imprecise(version: &str) -> bool {
    version == VERSION_DETECTED || version == VERSION_UNKNOWN
}

fn classify_nodejs(version: &str) -> Tier {
    if is_imprecise(version) {
        return Tier::Warning;
    }
    let major = major_version(version);
    if major < 14 {
        Tier::Error
    } else if major <= 16 {
        Tier::Warning
    } else {
        Tier::Success
    }
}

fn classify_python(version: &str) -> Tier {
    if is_imprecise(version) {
        return Tier::Warning;
    }
    let major = major_version(version);
    if major < 3 {
        return Tier::Error;
    }
    if major == 3 && minor_version(version) < 8 {
        return Tier::Warning;
    }
    Tier::Success
}

fn classify_java(version: &str) -> Tier {
    if is_imprecise(version) {
        return Tier::Warning;
    }
    let major = major_version(version);
    if major < 11 {
        Tier::Error
    } else if major < 17 {
        Tier::Warning
    } else {
        Tier::Success
    }
}

fn classify_go(version: &str) -> Tier {
    if is_imprecise(version) || version == VERSION_COMPILED {
        return Tier::Success;
    }
    let major = major_version(version);
    if major < 1 {
        return Tier::Error;
    }
    if major == 1 && minor_version(version) < 19 {
        return Tier::Warning;
    }
    Tier::Success
}

fn classify_php(version: &str) -> Tier {
    if is_imprecise(version) {
        return Tier::Warning;
    }
    let major = major_version(version);
    if major < 7 {
        Tier::Error
    } else if major == 7 {
        Tier::Warning
    } else {
        Tier::Success
    }
}

fn classify_ruby(version: &str) -> Tier {
    if is_imprecise(version) {
        return Tier::Warning;
    }
    let major = major_version(version);
    if major < 2 {
        Tier::Error
    } else if major == 2 {
        Tier::Warning
    } else {
        Tier::Success
    }
}

fn classify_dotnet(version: &str) -> Tier {
    if is_imprecise(version) {
        return Tier::Warning;
    }
    // .NET has no error tier; anything before 6 is merely a warning.
    if major_version(version) < 6 {
        Tier::Warning
    } else {
        Tier::Success
    }
}

/// Extracts the major component of a dotted version string.
///
/// Non-numeric or missing tokens parse to `0`.
pub fn major_version(version: &str) -> u32 {
    version
        .split('.')
        .next()
        .and_then(|token| token.parse().ok())
        .unwrap_or(0)
}

/// Extracts the minor component of a dotted version string.
pub fn minor_version(version: &str) -> u32 {
    version
        .split('.')
        .nth(1)
        .and_then(|token| token.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_minor_parsing() {
        assert_eq!(major_version("18.16.0"), 18);
        assert_eq!(minor_version("18.16.0"), 16);
        assert_eq!(major_version("18"), 18);
        assert_eq!(minor_version("18"), 0);
        assert_eq!(major_version("not-a-version"), 0);
        assert_eq!(minor_version("1.x"), 0);
        assert_eq!(major_version(""), 0);
    }

    #[test]
    fn test_nodejs_boundaries() {
        assert_eq!(classify(Runtime::NodeJs, "12.0.0"), Tier::Error);
        assert_eq!(classify(Runtime::NodeJs, "13.14.0"), Tier::Error);
        assert_eq!(classify(Runtime::NodeJs, "14.0.0"), Tier::Warning);
        assert_eq!(classify(Runtime::NodeJs, "16.20.0"), Tier::Warning);
        assert_eq!(classify(Runtime::NodeJs, "17.0.0"), Tier::Success);
        assert_eq!(classify(Runtime::NodeJs, "20.1.0"), Tier::Success);
    }

    #[test]
    fn test_python_minor_matters() {
        assert_eq!(classify(Runtime::Python, "2.7.18"), Tier::Error);
        assert_eq!(classify(Runtime::Python, "3.7.9"), Tier::Warning);
        assert_eq!(classify(Runtime::Python, "3.8.0"), Tier::Success);
        assert_eq!(classify(Runtime::Python, "3.12.1"), Tier::Success);
        assert_eq!(classify(Runtime::Python, "4.0"), Tier::Success);
    }

    #[test]
    fn test_java_thresholds() {
        assert_eq!(classify(Runtime::Java, "8"), Tier::Error);
        assert_eq!(classify(Runtime::Java, "11.0.2"), Tier::Warning);
        assert_eq!(classify(Runtime::Java, "16"), Tier::Warning);
        assert_eq!(classify(Runtime::Java, "17"), Tier::Success);
        assert_eq!(classify(Runtime::Java, "21"), Tier::Success);
    }

    #[test]
    fn test_go_thresholds_and_sentinels() {
        assert_eq!(classify(Runtime::Go, "0.9"), Tier::Error);
        assert_eq!(classify(Runtime::Go, "1.18.3"), Tier::Warning);
        assert_eq!(classify(Runtime::Go, "1.19"), Tier::Success);
        assert_eq!(classify(Runtime::Go, "1.21.0"), Tier::Success);
        assert_eq!(classify(Runtime::Go, "2.0"), Tier::Success);
        assert_eq!(classify(Runtime::Go, VERSION_COMPILED), Tier::Success);
        assert_eq!(classify(Runtime::Go, VERSION_DETECTED), Tier::Success);
        assert_eq!(classify(Runtime::Go, VERSION_UNKNOWN), Tier::Success);
    }

    #[test]
    fn test_php_ruby_thresholds() {
        assert_eq!(classify(Runtime::Php, "5.6"), Tier::Error);
        assert_eq!(classify(Runtime::Php, "7.4.33"), Tier::Warning);
        assert_eq!(classify(Runtime::Php, "8.2.0"), Tier::Success);

        assert_eq!(classify(Runtime::Ruby, "1.9.3"), Tier::Error);
        assert_eq!(classify(Runtime::Ruby, "2.7.8"), Tier::Warning);
        assert_eq!(classify(Runtime::Ruby, "3.2.2"), Tier::Success);
    }

    #[test]
    fn test_dotnet_has_no_error_tier() {
        assert_eq!(classify(Runtime::DotNet, "3.1"), Tier::Warning);
        assert_eq!(classify(Runtime::DotNet, "5.0"), Tier::Warning);
        assert_eq!(classify(Runtime::DotNet, "6.0"), Tier::Success);
        assert_eq!(classify(Runtime::DotNet, "8.0.1"), Tier::Success);
        // Even garbage parses to 0, which is still only a warning.
        assert_eq!(classify(Runtime::DotNet, "garbage"), Tier::Warning);
    }

    #[test]
    fn test_rust_always_success() {
        assert_eq!(classify(Runtime::Rust, "1.70.0"), Tier::Success);
        assert_eq!(classify(Runtime::Rust, VERSION_DETECTED), Tier::Success);
        assert_eq!(classify(Runtime::Rust, "0.1"), Tier::Success);
    }

    #[test]
    fn test_sentinels_checked_before_parsing() {
        // "detected" would parse to major 0 and hit the error bucket if the
        // sentinel check did not run first.
        assert_eq!(classify(Runtime::NodeJs, VERSION_DETECTED), Tier::Warning);
        assert_eq!(classify(Runtime::Python, VERSION_UNKNOWN), Tier::Warning);
        assert_eq!(classify(Runtime::Ruby, VERSION_DETECTED), Tier::Warning);
    }

    #[test]
    fn test_unparsable_version_lands_in_lowest_bucket() {
        assert_eq!(classify(Runtime::NodeJs, "latest"), Tier::Error);
        assert_eq!(classify(Runtime::Java, "openjdk"), Tier::Error);
    }

    #[test]
    fn test_classify_is_pure() {
        for _ in 0..2 {
            assert_eq!(classify(Runtime::NodeJs, "18.0.0"), Tier::Success);
        }
    }
}
