//! Checkpoint error types.

use crate::artifact::ArtifactError;
use crate::core::UnknownWord;
use thiserror::Error;

/// Errors that can occur while saving or resuming a session checkpoint
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// A recorded response names a word the catalog lacks
    #[error("Checkpoint does not match catalog: {0}")]
    UnknownWord(#[from] UnknownWord),

    #[error("Checkpoint position {category}:{word} is outside the catalog")]
    PositionOutOfRange { category: usize, word: usize },

    /// Marked complete but not every word was answered
    #[error("Completed checkpoint has {answered} of {total} responses")]
    IncompleteSession { answered: usize, total: usize },

    /// The stored prior would not pass artifact import
    #[error("Checkpoint prior is malformed: {0}")]
    InvalidPrior(#[source] ArtifactError),
}
