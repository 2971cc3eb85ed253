//! Pairwise image comparison
//!
//! Produces structured outcomes for size, layer count, and language
//! runtime; rendering is the formatter's job.

use serde::{Deserialize, Serialize};

use super::report::ImageReport;
use super::ImageMetadata;
use crate::detection::language::{detect_primary_language, LanguageInfo, Runtime};
use crate::detection::version::major_version;

/// Full comparison of two images: a minimal report for each plus the
/// pairwise outcomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageComparison {
    pub first: ImageReport,
    pub second: ImageReport,
    pub size: SizeComparison,
    pub layers: LayerComparison,
    pub language: LanguageComparison,
}

impl ImageComparison {
    pub fn build(
        name1: &str,
        metadata1: &ImageMetadata,
        name2: &str,
        metadata2: &ImageMetadata,
    ) -> Self {
        Self {
            first: ImageReport::build_minimal(name1, metadata1),
            second: ImageReport::build_minimal(name2, metadata2),
            size: compare_size(name1, metadata1, name2, metadata2),
            layers: compare_layers(name1, metadata1, name2, metadata2),
            language: compare_language(name1, metadata1, name2, metadata2),
        }
    }
}

/// Size relation between two images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SizeComparison {
    Equal {
        size: String,
    },
    Smaller {
        smaller_name: String,
        smaller_size: String,
        larger_name: String,
        larger_size: String,
        /// How much smaller, in percent of the larger image.
        percent: f64,
    },
}

/// Layer-count relation between two images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerComparison {
    Equal {
        layers: usize,
    },
    Fewer {
        fewer_name: String,
        fewer_layers: usize,
        more_name: String,
        more_layers: usize,
        difference: usize,
    },
}

/// Language-runtime relation between two images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguageComparison {
    NeitherDetected,
    OnlyOne {
        name: String,
        language: LanguageInfo,
    },
    Different {
        first: LanguageInfo,
        second: LanguageInfo,
    },
    SameVersion {
        runtime: Runtime,
        version: String,
    },
    SameMajor {
        runtime: Runtime,
        version: String,
    },
    Newer {
        newer_name: String,
        runtime: Runtime,
        newer_version: String,
        older_version: String,
    },
}

pub fn compare_size(
    name1: &str,
    metadata1: &ImageMetadata,
    name2: &str,
    metadata2: &ImageMetadata,
) -> SizeComparison {
    if metadata1.size_bytes == metadata2.size_bytes {
        return SizeComparison::Equal {
            size: metadata1.size_string(),
        };
    }

    let (smaller_name, smaller, larger_name, larger) = if metadata1.size_bytes < metadata2.size_bytes
    {
        (name1, metadata1, name2, metadata2)
    } else {
        (name2, metadata2, name1, metadata1)
    };

    let percent = 100.0 - (smaller.size_bytes as f64 / larger.size_bytes as f64) * 100.0;

    SizeComparison::Smaller {
        smaller_name: smaller_name.to_string(),
        smaller_size: smaller.size_string(),
        larger_name: larger_name.to_string(),
        larger_size: larger.size_string(),
        percent,
    }
}

pub fn compare_layers(
    name1: &str,
    metadata1: &ImageMetadata,
    name2: &str,
    metadata2: &ImageMetadata,
) -> LayerComparison {
    if metadata1.layers == metadata2.layers {
        return LayerComparison::Equal {
            layers: metadata1.layers,
        };
    }

    let (fewer_name, fewer, more_name, more) = if metadata1.layers < metadata2.layers {
        (name1, metadata1, name2, metadata2)
    } else {
        (name2, metadata2, name1, metadata1)
    };

    LayerComparison::Fewer {
        fewer_name: fewer_name.to_string(),
        fewer_layers: fewer.layers,
        more_name: more_name.to_string(),
        more_layers: more.layers,
        difference: more.layers - fewer.layers,
    }
}

pub fn compare_language(
    name1: &str,
    metadata1: &ImageMetadata,
    name2: &str,
    metadata2: &ImageMetadata,
) -> LanguageComparison {
    let lang1 = detect_primary_language(metadata1);
    let lang2 = detect_primary_language(metadata2);

    match (lang1, lang2) {
        (None, None) => LanguageComparison::NeitherDetected,
        (None, Some(language)) => LanguageComparison::OnlyOne {
            name: name2.to_string(),
            language,
        },
        (Some(language), None) => LanguageComparison::OnlyOne {
            name: name1.to_string(),
            language,
        },
        (Some(first), Some(second)) => {
            if first.runtime != second.runtime {
                return LanguageComparison::Different { first, second };
            }
            if first.version == second.version {
                return LanguageComparison::SameVersion {
                    runtime: first.runtime,
                    version: first.version,
                };
            }

            let major1 = major_version(&first.version);
            let major2 = major_version(&second.version);
            if major1 == major2 {
                return LanguageComparison::SameMajor {
                    runtime: first.runtime,
                    version: first.version,
                };
            }

            if major1 > major2 {
                LanguageComparison::Newer {
                    newer_name: name1.to_string(),
                    runtime: first.runtime,
                    newer_version: first.version,
                    older_version: second.version,
                }
            } else {
                LanguageComparison::Newer {
                    newer_name: name2.to_string(),
                    runtime: second.runtime,
                    newer_version: second.version,
                    older_version: first.version,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(size: i64, layers: usize, env: &[&str]) -> ImageMetadata {
        ImageMetadata {
            size_bytes: size,
            layers,
            env: env.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_size_equal() {
        let a = metadata(50_000_000, 5, &[]);
        let b = metadata(50_000_000, 7, &[]);
        assert_eq!(
            compare_size("a", &a, "b", &b),
            SizeComparison::Equal {
                size: "50.00 MB".to_string()
            }
        );
    }

    #[test]
    fn test_size_smaller_percent() {
        let a = metadata(50_000_000, 5, &[]);
        let b = metadata(100_000_000, 5, &[]);

        match compare_size("a", &a, "b", &b) {
            SizeComparison::Smaller {
                smaller_name,
                larger_name,
                percent,
                ..
            } => {
                assert_eq!(smaller_name, "a");
                assert_eq!(larger_name, "b");
                assert!((percent - 50.0).abs() < 0.001);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_layers_fewer() {
        let a = metadata(1, 12, &[]);
        let b = metadata(1, 5, &[]);

        assert_eq!(
            compare_layers("a", &a, "b", &b),
            LayerComparison::Fewer {
                fewer_name: "b".to_string(),
                fewer_layers: 5,
                more_name: "a".to_string(),
                more_layers: 12,
                difference: 7,
            }
        );
    }

    #[test]
    fn test_language_newer_major_wins() {
        let a = metadata(1, 1, &["NODE_VERSION=20.0.0"]);
        let b = metadata(1, 1, &["NODE_VERSION=18.0.0"]);

        match compare_language("a", &a, "b", &b) {
            LanguageComparison::Newer {
                newer_name,
                newer_version,
                older_version,
                ..
            } => {
                assert_eq!(newer_name, "a");
                assert_eq!(newer_version, "20.0.0");
                assert_eq!(older_version, "18.0.0");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_language_same_major() {
        let a = metadata(1, 1, &["NODE_VERSION=18.2.0"]);
        let b = metadata(1, 1, &["NODE_VERSION=18.9.1"]);

        assert!(matches!(
            compare_language("a", &a, "b", &b),
            LanguageComparison::SameMajor { .. }
        ));
    }

    #[test]
    fn test_language_different_runtimes() {
        let a = metadata(1, 1, &["NODE_VERSION=18.0.0"]);
        let b = metadata(1, 1, &["PYTHON_VERSION=3.12.0"]);

        assert!(matches!(
            compare_language("a", &a, "b", &b),
            LanguageComparison::Different { .. }
        ));
    }

    #[test]
    fn test_language_only_one() {
        let a = metadata(1, 1, &[]);
        let b = metadata(1, 1, &["RUBY_VERSION=3.2.0"]);

        match compare_language("a", &a, "b", &b) {
            LanguageComparison::OnlyOne { name, .. } => assert_eq!(name, "b"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_language_neither() {
        let a = metadata(1, 1, &[]);
        let b = metadata(1, 1, &[]);
        assert_eq!(
            compare_language("a", &a, "b", &b),
            LanguageComparison::NeitherDetected
        );
    }
}
