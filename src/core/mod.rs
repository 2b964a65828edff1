//! Pure core of the survey.
//!
//! This module holds the catalog, the cursor that walks it, the response
//! maps and the step history. Nothing here performs I/O; the session and
//! artifact modules build on it.

mod catalog;
mod history;
mod position;
mod response;
mod state;

pub use catalog::{Catalog, CatalogError, CatalogViolation, CategoryId, WordId, WordKey};
pub use history::{SessionHistory, Step, StepAction};
pub use position::Position;
pub use response::{Color, ResponseSet, Responses, UnknownWord};
pub use state::SurveyPhase;
