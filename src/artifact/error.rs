//! Artifact error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while exporting, importing or storing artifacts
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Bytes are not JSON at all
    #[error("artifact is not valid JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    /// JSON, but not an object of category -> word -> color strings
    #[error("artifact must map categories to objects of word/color strings: {0}")]
    UnexpectedShape(#[source] serde_json::Error),

    /// A color value is not `#RRGGBB`
    #[error("color '{color}' for '{word}' in '{category}' is not a #RRGGBB value")]
    InvalidColor {
        category: String,
        word: String,
        color: String,
    },

    #[error("failed to serialize artifact: {0}")]
    Serialization(#[source] serde_json::Error),

    /// An artifact with the same name was saved earlier
    #[error("artifact {} already exists", .0.display())]
    AlreadyExists(PathBuf),

    #[error("'{0}' is not an artifact file name")]
    InvalidName(String),

    #[error("artifact I/O failed for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ArtifactError {
    /// True when imported bytes were rejected, as opposed to an I/O or
    /// naming failure.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::MalformedJson(_) | Self::UnexpectedShape(_) | Self::InvalidColor { .. }
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
