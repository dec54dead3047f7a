//! Messaging bridge error types.

use derive_getters::Getters;

/// Kinds of bridge errors.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum BridgeErrorKind {
    /// No bridge channel is tracked for the named course.
    #[display("No bridge channel for course: {_0}")]
    UnknownCourse(String),

    /// The bridge relay could not be reached.
    #[display("Bridge relay unavailable: {_0}")]
    RelayUnavailable(String),
}

/// Bridge error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Bridge Error: {} at line {} in {}", kind, line, file)]
pub struct BridgeError {
    kind: BridgeErrorKind,
    line: u32,
    file: &'static str,
}

impl BridgeError {
    /// Create a new BridgeError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: BridgeErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
