//! Checkpoint and resume for survey sessions.
//!
//! A checkpoint captures a session so it can survive a process restart and
//! be resumed against the same catalog. JSON is provided for readability and
//! bincode for compactness.

use crate::artifact;
use crate::core::{Catalog, ResponseSet, Responses, SessionHistory, SurveyPhase};
use crate::session::{Completed, InProgress, SessionData, Survey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a survey session.
///
/// Responses are stored by name, so a checkpoint stays readable even if
/// the catalog it was taken from changes. Resuming checks it still fits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionCheckpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub created_at: DateTime<Utc>,

    pub phase: SurveyPhase,

    pub responses: ResponseSet,

    /// Prior session loaded for comparison, if any
    pub prior: Option<ResponseSet>,

    pub history: SessionHistory,
}

impl SessionCheckpoint {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }
}

impl Survey {
    /// Snapshot this session.
    pub fn checkpoint(&self) -> SessionCheckpoint {
        let data = self.data();
        SessionCheckpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            phase: self.phase(),
            responses: data.responses.to_response_set(&data.catalog),
            prior: data.prior.clone(),
            history: data.history.clone(),
        }
    }

    /// Rebuild a session from a checkpoint taken against `catalog`.
    ///
    /// Fails if the version is unknown, the prior holds a color that is not
    /// `#RRGGBB`, a response names a word `catalog` lacks, the position is
    /// out of range, or a completed checkpoint is missing answers.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chromasurvey::checkpoint::SessionCheckpoint;
    /// use chromasurvey::core::Catalog;
    /// use chromasurvey::session::Survey;
    ///
    /// let catalog = Catalog::new([("Nature", vec!["Ocean", "Sky"])]).unwrap();
    /// let survey = match Survey::start(catalog.clone()) {
    ///     Survey::InProgress(running) => running.submit_and_advance("#1E90FF"),
    ///     done => done,
    /// };
    ///
    /// let json = survey.checkpoint().to_json().unwrap();
    /// let resumed = Survey::resume(catalog, SessionCheckpoint::from_json(&json).unwrap()).unwrap();
    ///
    /// assert_eq!(resumed.phase(), survey.phase());
    /// assert_eq!(resumed.responses(), survey.responses());
    /// ```
    pub fn resume(
        catalog: impl Into<Arc<Catalog>>,
        checkpoint: SessionCheckpoint,
    ) -> Result<Survey, CheckpointError> {
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: checkpoint.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        if let Some(prior) = &checkpoint.prior {
            artifact::check_colors(prior).map_err(CheckpointError::InvalidPrior)?;
        }

        let catalog = catalog.into();
        let responses = Responses::from_response_set(&catalog, &checkpoint.responses)?;

        let data = SessionData {
            catalog,
            responses,
            prior: checkpoint.prior,
            history: checkpoint.history,
        };

        let survey = match checkpoint.phase {
            SurveyPhase::InProgress { position } => {
                if !data.catalog.contains(position.key()) {
                    return Err(CheckpointError::PositionOutOfRange {
                        category: position.category.index(),
                        word: position.word.index(),
                    });
                }
                Survey::InProgress(InProgress { data, position })
            }
            SurveyPhase::Complete => {
                let total = data.catalog.total_words();
                if data.responses.len() != total {
                    return Err(CheckpointError::IncompleteSession {
                        answered: data.responses.len(),
                        total,
                    });
                }
                Survey::Complete(Completed { data })
            }
        };

        tracing::info!(
            id = %checkpoint.id,
            phase = survey.phase().name(),
            "resumed survey from checkpoint"
        );
        Ok(survey)
    }
}
