//! Reconciliation handler error types.

use crate::{BridgeError, GuildError};
use derive_getters::Getters;

/// Kinds of reconciliation errors.
///
/// Remote-API failures abort the remainder of a handler and propagate here.
/// Precondition failures (`NotACourseMember`, `CourseMissing`) are surfaced
/// to the invoking command layer as user-facing results, not system faults.
#[derive(Debug, Clone, derive_more::Display)]
pub enum SyncErrorKind {
    /// A remote guild mutation failed mid-handler.
    #[display("{_0}")]
    Guild(GuildError),

    /// A bridge operation failed.
    #[display("{_0}")]
    Bridge(BridgeError),

    /// The course record backing an event could not be resolved.
    #[display("Course not found: {_0}")]
    CourseMissing(String),

    /// A user must be a course member before being promoted to instructor.
    #[display("User {user} is not a member of course {course}")]
    NotACourseMember {
        /// Platform user id of the user being promoted.
        user: String,
        /// Name of the course the promotion targeted.
        course: String,
    },
}

/// Reconciliation error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Sync Error: {} at line {} in {}", kind, line, file)]
pub struct SyncError {
    kind: SyncErrorKind,
    line: u32,
    file: &'static str,
}

impl SyncError {
    /// Create a new SyncError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SyncErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether this error reports a violated precondition rather than a
    /// remote fault. Precondition failures are phrased for the end user by
    /// the command layer.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self.kind,
            SyncErrorKind::CourseMissing(_) | SyncErrorKind::NotACourseMember { .. }
        )
    }
}

impl From<GuildError> for SyncError {
    #[track_caller]
    fn from(err: GuildError) -> Self {
        SyncError::new(SyncErrorKind::Guild(err))
    }
}

impl From<BridgeError> for SyncError {
    #[track_caller]
    fn from(err: BridgeError) -> Self {
        SyncError::new(SyncErrorKind::Bridge(err))
    }
}

/// Result type for reconciliation handlers.
pub type SyncResult<T> = Result<T, SyncError>;
