//! The survey session state machine.
//!
//! Built on the pure core: navigation is delegated to [`Position`], responses
//! live in [`Responses`], and each step is appended to a
//! [`SessionHistory`]. Rendering is the caller's concern; every operation
//! runs to completion and hands back the state to draw.
//!
//! [`Position`]: crate::core::Position
//! [`Responses`]: crate::core::Responses
//! [`SessionHistory`]: crate::core::SessionHistory

mod error;
mod machine;
mod progress;

pub use error::SessionError;
pub use machine::{Completed, CurrentWord, InProgress, Survey};
pub use progress::Progress;

pub(crate) use machine::SessionData;
