//! Chromasurvey: a word-to-color association survey.
//!
//! The survey walks a fixed catalog of words, one at a time, collecting the
//! color a respondent associates with each. Finished sessions are exported
//! as JSON artifacts and can be compared with an earlier session.
//!
//! The crate is a pure core with a thin shell around it. Rendering belongs
//! to the caller: every operation returns the new state and the caller
//! redraws from it.
//!
//! # Modules
//!
//! - [`core`]: catalog, position, responses and step history (no I/O)
//! - [`session`]: the survey state machine
//! - [`artifact`]: export, import, comparison and the artifact directory
//! - [`checkpoint`]: snapshot and resume of a session
//! - [`config`]: TOML configuration
//!
//! # Example
//!
//! ```rust
//! use chromasurvey::core::Catalog;
//! use chromasurvey::session::Survey;
//!
//! let catalog = Catalog::new([
//!     ("Emotions", vec!["Happy", "Sad"]),
//!     ("Nature", vec!["Ocean"]),
//! ])
//! .unwrap();
//!
//! let Survey::InProgress(survey) = Survey::start(catalog) else { unreachable!() };
//! assert_eq!(survey.current_word().word, "Happy");
//!
//! let Survey::InProgress(mut survey) = survey.submit_and_advance("#FF0000") else { unreachable!() };
//! assert_eq!(survey.current_word().word, "Sad");
//!
//! survey.retreat().unwrap();
//! assert_eq!(survey.current_word().word, "Happy");
//! assert_eq!(survey.suggested_color().as_str(), "#FF0000");
//! ```

pub mod artifact;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod error;
pub mod session;

// Re-export commonly used types
pub use artifact::{Artifact, ArtifactName, ArtifactStore, Comparison};
pub use config::SurveyConfig;
pub use core::{Catalog, Color, Position, ResponseSet, SurveyPhase};
pub use error::{Error, Result};
pub use session::{Completed, InProgress, Survey};
