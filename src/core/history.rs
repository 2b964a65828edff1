//! Step history of a survey session.
//!
//! Every navigation step is recorded as an immutable value with its
//! timestamp, so a finished session can report how it was traversed and
//! how long it took.

use super::state::SurveyPhase;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which navigation operation produced a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepAction {
    Advance,
    Retreat,
}

/// Record of a single navigation step.
///
/// # Example
///
/// ```rust
/// use chromasurvey::core::{Position, Step, StepAction, SurveyPhase};
/// use chrono::Utc;
///
/// let step = Step {
///     action: StepAction::Advance,
///     from: SurveyPhase::InProgress { position: Position::start() },
///     to: SurveyPhase::Complete,
///     timestamp: Utc::now(),
/// };
/// assert!(step.to.is_final());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub action: StepAction,
    pub from: SurveyPhase,
    pub to: SurveyPhase,
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of navigation steps.
///
/// History is immutable: [`SessionHistory::record`] returns a new history
/// with the step appended.
///
/// # Example
///
/// ```rust
/// use chromasurvey::core::{Catalog, Position, SessionHistory, Step, StepAction, SurveyPhase};
/// use chrono::Utc;
///
/// let catalog = Catalog::new([("Nature", vec!["Ocean", "Sky"])]).unwrap();
/// let first = Position::start();
/// let second = first.next(&catalog).unwrap();
///
/// let history = SessionHistory::new().record(Step {
///     action: StepAction::Advance,
///     from: SurveyPhase::InProgress { position: first },
///     to: SurveyPhase::InProgress { position: second },
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.path().len(), 2);
/// assert_eq!(history.count(StepAction::Advance), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionHistory {
    steps: Vec<Step>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Record a step, returning a new history. The original is unchanged.
    pub fn record(&self, step: Step) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }

    /// Phases visited: the first step's origin, then each step's target.
    pub fn path(&self) -> Vec<&SurveyPhase> {
        let mut path = Vec::with_capacity(self.steps.len() + 1);
        if let Some(first) = self.steps.first() {
            path.push(&first.from);
        }
        path.extend(self.steps.iter().map(|step| &step.to));
        path
    }

    /// Time between the first and last recorded step.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.steps.first()?, self.steps.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn count(&self, action: StepAction) -> usize {
        self.steps.iter().filter(|s| s.action == action).count()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
