//! Survey session state machine.
//!
//! A session is a value owned by the caller. Operations that can change the
//! phase consume the session and return the next one; the caller redraws
//! from whatever comes back.

use crate::artifact::{self, Artifact, ArtifactError, ArtifactName, Comparison};
use crate::core::{
    Catalog, Color, Position, ResponseSet, Responses, SessionHistory, Step, StepAction,
    SurveyPhase, WordKey,
};
use crate::session::error::SessionError;
use crate::session::progress::Progress;
use chrono::{NaiveDateTime, Utc};
use std::sync::Arc;

/// State carried through every phase.
#[derive(Clone, Debug)]
pub(crate) struct SessionData {
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) responses: Responses,
    pub(crate) prior: Option<ResponseSet>,
    pub(crate) history: SessionHistory,
}

impl SessionData {
    fn fresh(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            responses: Responses::new(),
            prior: None,
            history: SessionHistory::new(),
        }
    }

    fn record(&mut self, action: StepAction, from: SurveyPhase, to: SurveyPhase) {
        self.history = self.history.record(Step {
            action,
            from,
            to,
            timestamp: Utc::now(),
        });
    }

    fn load_prior(&mut self, bytes: &[u8]) -> Result<&ResponseSet, ArtifactError> {
        let prior = artifact::import(bytes).inspect_err(|e| {
            tracing::warn!(error = %e, "prior artifact rejected; keeping previous comparison");
        })?;
        tracing::info!(responses = prior.len(), "loaded prior responses");
        Ok(self.prior.insert(prior))
    }
}

/// The word awaiting a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrentWord<'a> {
    pub key: WordKey,
    pub category: &'a str,
    pub word: &'a str,
}

/// A survey still collecting responses.
#[derive(Clone, Debug)]
pub struct InProgress {
    pub(crate) data: SessionData,
    pub(crate) position: Position,
}

/// A survey whose every word has been answered. Responses are frozen.
#[derive(Clone, Debug)]
pub struct Completed {
    pub(crate) data: SessionData,
}

/// A survey session in either phase.
///
/// # Example
///
/// ```rust
/// use chromasurvey::core::Catalog;
/// use chromasurvey::session::Survey;
///
/// let catalog = Catalog::new([("Emotions", vec!["Happy", "Sad"]), ("Nature", vec!["Ocean"])]).unwrap();
/// let mut survey = Survey::start(catalog);
///
/// for color in ["#FF0000", "#00FF00", "#0000FF"] {
///     survey = match survey {
///         Survey::InProgress(running) => running.submit_and_advance(color),
///         Survey::Complete(_) => unreachable!(),
///     };
/// }
///
/// let done = survey.as_complete().unwrap();
/// let set = done.response_set();
/// assert_eq!(set.get("Nature", "Ocean").unwrap().as_str(), "#0000FF");
/// ```
#[derive(Clone, Debug)]
pub enum Survey {
    InProgress(InProgress),
    Complete(Completed),
}

impl InProgress {
    /// Begin at the first word with no responses.
    pub fn start(catalog: impl Into<Arc<Catalog>>) -> Self {
        Self {
            data: SessionData::fresh(catalog.into()),
            position: Position::start(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.data.catalog
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn phase(&self) -> SurveyPhase {
        SurveyPhase::InProgress {
            position: self.position,
        }
    }

    pub fn responses(&self) -> &Responses {
        &self.data.responses
    }

    pub fn prior(&self) -> Option<&ResponseSet> {
        self.data.prior.as_ref()
    }

    pub fn history(&self) -> &SessionHistory {
        &self.data.history
    }

    pub fn current_word(&self) -> CurrentWord<'_> {
        let key = self.position.key();
        let (category, word) = self.data.catalog.names(key);
        CurrentWord {
            key,
            category,
            word,
        }
    }

    /// Color to pre-select: the one already recorded for this word, or
    /// [`Color::UNRATED`].
    pub fn suggested_color(&self) -> Color {
        self.data
            .responses
            .get(self.position.key())
            .cloned()
            .unwrap_or_default()
    }

    /// Record `color` for the current word and move one word forward.
    ///
    /// The color is stored verbatim. Submitting past the final word
    /// completes the survey.
    pub fn submit_and_advance(mut self, color: impl Into<Color>) -> Survey {
        let color = color.into();
        let from = self.phase();
        let key = self.position.key();

        let replaced = self.data.responses.insert(key, color.clone());
        {
            let (category, word) = self.data.catalog.names(key);
            tracing::debug!(
                category,
                word,
                color = %color,
                overwrote = replaced.is_some(),
                "recorded response"
            );
        }

        match self.position.next(&self.data.catalog) {
            Some(next) => {
                self.position = next;
                self.data.record(StepAction::Advance, from, self.phase());
                Survey::InProgress(self)
            }
            None => {
                self.data
                    .record(StepAction::Advance, from, SurveyPhase::Complete);
                tracing::info!(
                    responses = self.data.responses.len(),
                    "survey complete"
                );
                Survey::Complete(Completed { data: self.data })
            }
        }
    }

    /// Whether [`InProgress::retreat`] would move.
    pub fn has_previous(&self) -> bool {
        !self.position.is_start()
    }

    /// Step back one word without touching any recorded response.
    ///
    /// At the first word this returns [`SessionError::NoPreviousWord`] and
    /// the session is unchanged.
    pub fn retreat(&mut self) -> Result<(), SessionError> {
        let Some(previous) = self.position.previous(&self.data.catalog) else {
            tracing::warn!("retreat requested at the first word");
            return Err(SessionError::NoPreviousWord);
        };

        let from = self.phase();
        self.position = previous;
        self.data.record(StepAction::Retreat, from, self.phase());

        let current = self.current_word();
        tracing::debug!(
            category = current.category,
            word = current.word,
            "moved back"
        );
        Ok(())
    }

    /// Position in declared catalog order.
    pub fn progress(&self) -> Progress {
        Progress {
            passed: self.data.catalog.flat_index(self.position.key()),
            total: self.data.catalog.total_words(),
        }
    }

    /// Import a prior artifact for later comparison. On failure the
    /// session, including any earlier prior, is unchanged.
    pub fn load_prior(&mut self, bytes: &[u8]) -> Result<&ResponseSet, ArtifactError> {
        self.data.load_prior(bytes)
    }

    /// Start over with the same catalog.
    pub fn reset(self) -> InProgress {
        InProgress::start(self.data.catalog)
    }
}

impl Completed {
    pub fn catalog(&self) -> &Catalog {
        &self.data.catalog
    }

    pub fn responses(&self) -> &Responses {
        &self.data.responses
    }

    /// Responses keyed by names, as exported.
    pub fn response_set(&self) -> ResponseSet {
        self.data.responses.to_response_set(&self.data.catalog)
    }

    pub fn prior(&self) -> Option<&ResponseSet> {
        self.data.prior.as_ref()
    }

    pub fn history(&self) -> &SessionHistory {
        &self.data.history
    }

    /// Serialize the responses under a name stamped with the local time.
    pub fn export(&self, prefix: &str) -> Result<Artifact, ArtifactError> {
        artifact::export(&self.response_set(), ArtifactName::now(prefix))
    }

    pub fn export_at(&self, prefix: &str, at: NaiveDateTime) -> Result<Artifact, ArtifactError> {
        artifact::export(&self.response_set(), ArtifactName::new(prefix, at))
    }

    /// Side-by-side rows against the loaded prior, `None` if none is loaded.
    pub fn compare(&self) -> Option<Vec<Comparison>> {
        let prior = self.data.prior.as_ref()?;
        Some(artifact::compare(
            &self.data.catalog,
            &self.response_set(),
            prior,
        ))
    }

    pub fn load_prior(&mut self, bytes: &[u8]) -> Result<&ResponseSet, ArtifactError> {
        self.data.load_prior(bytes)
    }

    pub fn reset(self) -> InProgress {
        InProgress::start(self.data.catalog)
    }
}

impl Survey {
    pub fn start(catalog: impl Into<Arc<Catalog>>) -> Self {
        Self::InProgress(InProgress::start(catalog))
    }

    pub fn phase(&self) -> SurveyPhase {
        match self {
            Self::InProgress(running) => running.phase(),
            Self::Complete(_) => SurveyPhase::Complete,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.data().catalog
    }

    pub fn responses(&self) -> &Responses {
        &self.data().responses
    }

    pub fn prior(&self) -> Option<&ResponseSet> {
        self.data().prior.as_ref()
    }

    pub fn as_in_progress(&self) -> Option<&InProgress> {
        match self {
            Self::InProgress(running) => Some(running),
            Self::Complete(_) => None,
        }
    }

    pub fn as_complete(&self) -> Option<&Completed> {
        match self {
            Self::Complete(done) => Some(done),
            Self::InProgress(_) => None,
        }
    }

    pub fn load_prior(&mut self, bytes: &[u8]) -> Result<&ResponseSet, ArtifactError> {
        match self {
            Self::InProgress(running) => running.load_prior(bytes),
            Self::Complete(done) => done.load_prior(bytes),
        }
    }

    /// Discard responses, prior and history; begin again at the first word.
    pub fn reset(self) -> Survey {
        tracing::info!(from = self.phase().name(), "survey reset");
        let fresh = match self {
            Self::InProgress(running) => running.reset(),
            Self::Complete(done) => done.reset(),
        };
        Self::InProgress(fresh)
    }

    pub(crate) fn data(&self) -> &SessionData {
        match self {
            Self::InProgress(running) => &running.data,
            Self::Complete(done) => &done.data,
        }
    }
}

impl From<InProgress> for Survey {
    fn from(running: InProgress) -> Self {
        Self::InProgress(running)
    }
}

impl From<Completed> for Survey {
    fn from(done: Completed) -> Self {
        Self::Complete(done)
    }
}
