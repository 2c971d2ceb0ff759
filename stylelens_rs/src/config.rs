//! Configuration for analysis runs.
//!
//! [`AnalysisConfig`] is built once per process and passed explicitly into
//! every call that needs it. [`StylelensConfig`] is the optional
//! `.stylelens/config.toml` a host can load to override the defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::utility::UtilityVocabulary;

/// Occurrence counts that classify duplicate groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Groups with at least this many occurrences are `critical`.
    pub critical: usize,
    /// Groups with at least this many occurrences are `warning`.
    pub warning: usize,
    /// Class groups with at least this many occurrences are recommended for extraction.
    pub recommendation: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            critical: 5,
            warning: 3,
            recommendation: 5,
        }
    }
}

/// Slice sizes of the heat ranking, taken in order from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HeatBuckets {
    pub hot: usize,
    pub warm: usize,
    pub normal: usize,
}

impl Default for HeatBuckets {
    fn default() -> Self {
        Self {
            hot: 5,
            warm: 10,
            normal: 15,
        }
    }
}

/// Limits for per-document duplicate lenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LensConfig {
    /// Documents longer than this are not inspected.
    pub max_lines: usize,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self { max_lines: 2000 }
    }
}

pub const DEFAULT_WORKERS: usize = 4;

/// Everything an analysis run reads besides its documents.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub vocabulary: UtilityVocabulary,
    pub thresholds: Thresholds,
    pub heat: HeatBuckets,
    pub lens: LensConfig,
    /// Upper bound on concurrent adapter runs.
    pub workers: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            vocabulary: UtilityVocabulary::default(),
            thresholds: Thresholds::default(),
            heat: HeatBuckets::default(),
            lens: LensConfig::default(),
            workers: DEFAULT_WORKERS,
        }
    }
}

impl AnalysisConfig {
    pub fn with_vocabulary(vocabulary: UtilityVocabulary) -> Self {
        Self {
            vocabulary,
            ..Self::default()
        }
    }
}

/// Root of `.stylelens/config.toml`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct StylelensConfig {
    pub thresholds: Thresholds,
    pub heat: HeatBuckets,
    pub lens: LensConfig,
    pub workers: Option<usize>,
    /// Utility vocabulary JSON, relative to the project root.
    pub vocabulary: Option<PathBuf>,
    /// Extra glob patterns excluded from discovery.
    pub ignore: Vec<String>,
}

impl StylelensConfig {
    /// Relative location of the config file under a project root.
    pub const RELATIVE_PATH: &'static str = ".stylelens/config.toml";

    /// Read `.stylelens/config.toml` under `root`, falling back to defaults.
    pub fn load(root: &Path) -> Self {
        Self::load_from_path(&root.join(Self::RELATIVE_PATH))
    }

    /// A missing file is silent; unreadable or malformed files log a warning.
    pub fn load_from_path(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "config unreadable, using defaults");
                return Self::default();
            }
        };
        Self::parse(&text).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "config invalid, using defaults");
            Self::default()
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Combine file settings with a loaded vocabulary.
    pub fn analysis_config(&self, vocabulary: UtilityVocabulary) -> AnalysisConfig {
        AnalysisConfig {
            vocabulary,
            thresholds: self.thresholds,
            heat: self.heat,
            lens: self.lens,
            workers: self.workers.unwrap_or(DEFAULT_WORKERS).max(1),
        }
    }
}
