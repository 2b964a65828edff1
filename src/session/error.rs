//! Session error types.

use thiserror::Error;

/// Navigation requests the current phase cannot honor.
///
/// The session is left unchanged whenever one of these is returned.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("already at the first word; there is no previous word")]
    NoPreviousWord,
}
