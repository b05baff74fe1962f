//! Data-model error types.
//!
//! Only parsing of wire strings back into the typed vocabulary can fail
//! in this crate. LMS communication failures never surface as errors:
//! the gateway degrades them to no-op plus a log line so the lesson
//! page stays usable without an LMS.

use thiserror::Error;

/// Errors produced when a string read from the LMS does not match any
/// legal SCORM 1.2 vocabulary value.
#[derive(Debug, Error)]
pub enum DataModelError {
    /// Not one of the six legal lesson/objective status strings.
    #[error("unknown lesson status: {0:?}")]
    UnknownLessonStatus(String),

    /// Not one of the legal exit conditions.
    #[error("unknown exit condition: {0:?}")]
    UnknownExitCondition(String),

    /// Not one of the eight legal interaction types.
    #[error("unknown interaction type: {0:?}")]
    UnknownInteractionType(String),

    /// Not a legal interaction result keyword or a decimal number.
    #[error("unknown interaction result: {0:?}")]
    UnknownInteractionResult(String),
}
