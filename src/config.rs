//! Survey configuration.
//!
//! # TOML Structure
//!
//! ```toml
//! [artifacts]
//! dir = "results"
//! prefix = "color_test_"
//!
//! [[categories]]
//! name = "Emotions"
//! words = ["Happy", "Sad"]
//!
//! [[categories]]
//! name = "Nature"
//! words = ["Ocean"]
//! ```
//!
//! Every section is optional. Without `[[categories]]` the built-in catalog
//! is used. Categories are an array so declared order is preserved.

use crate::artifact::{ArtifactError, ArtifactStore, DEFAULT_PREFIX};
use crate::core::{Catalog, CatalogError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("artifact prefix '{0}' must be non-empty and contain no path separators")]
    InvalidPrefix(String),
}

/// Where and how artifacts are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactConfig {
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            prefix: default_prefix(),
        }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    pub words: Vec<String>,
}

/// Root survey configuration.
///
/// # Example
///
/// ```rust
/// use chromasurvey::config::SurveyConfig;
///
/// let config = SurveyConfig::from_toml_str(r#"
///     [artifacts]
///     dir = "out"
///
///     [[categories]]
///     name = "Nature"
///     words = ["Ocean", "Sky"]
/// "#).unwrap();
///
/// assert_eq!(config.artifacts.prefix, "color_test_");
/// assert_eq!(config.catalog().unwrap().total_words(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyConfig {
    #[serde(default)]
    pub artifacts: ArtifactConfig,

    /// Empty means the built-in catalog.
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
}

impl SurveyConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded survey config");
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check everything that can be checked without touching the disk.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let prefix = &self.artifacts.prefix;
        if prefix.is_empty() || prefix.contains(['/', '\\']) {
            return Err(ConfigError::InvalidPrefix(prefix.clone()));
        }
        self.catalog()?;
        Ok(())
    }

    pub fn catalog(&self) -> Result<Catalog, CatalogError> {
        if self.categories.is_empty() {
            return Ok(Catalog::builtin());
        }
        Catalog::new(
            self.categories
                .iter()
                .map(|c| (c.name.clone(), c.words.clone())),
        )
    }

    /// Open the configured artifact directory.
    pub fn store(&self) -> Result<ArtifactStore, ArtifactError> {
        ArtifactStore::open(&self.artifacts.dir, self.artifacts.prefix.clone())
    }
}
