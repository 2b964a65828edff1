//! Survey phase: where a session stands in its lifecycle.

use super::position::Position;
use serde::{Deserialize, Serialize};

/// Lifecycle phase of a survey session.
///
/// `Complete` is terminal; only a reset leaves it, and a reset starts over
/// at [`Position::start`].
///
/// # Example
///
/// ```rust
/// use chromasurvey::core::{Position, SurveyPhase};
///
/// let phase = SurveyPhase::InProgress { position: Position::start() };
/// assert_eq!(phase.name(), "InProgress");
/// assert!(!phase.is_final());
/// assert!(SurveyPhase::Complete.is_final());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyPhase {
    InProgress { position: Position },
    Complete,
}

impl SurveyPhase {
    /// Phase name for display and logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InProgress { .. } => "InProgress",
            Self::Complete => "Complete",
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Self::Complete)
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            Self::InProgress { position } => Some(*position),
            Self::Complete => None,
        }
    }
}

impl Default for SurveyPhase {
    fn default() -> Self {
        Self::InProgress {
            position: Position::start(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_phase_starts_at_first_word() {
        let phase = SurveyPhase::default();
        assert_eq!(phase.position(), Some(Position::start()));
        assert!(!phase.is_final());
    }

    #[test]
    fn complete_has_no_position() {
        assert_eq!(SurveyPhase::Complete.position(), None);
        assert_eq!(SurveyPhase::Complete.name(), "Complete");
    }

    #[test]
    fn phase_serializes_as_snake_case() {
        let json = serde_json::to_string(&SurveyPhase::Complete).unwrap();
        assert_eq!(json, r#""complete""#);

        let phase = SurveyPhase::default();
        let json = serde_json::to_string(&phase).unwrap();
        let back: SurveyPhase = serde_json::from_str(&json).unwrap();
        assert_eq!(back, phase);
    }
}
