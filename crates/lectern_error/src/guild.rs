//! Remote guild error types.

use derive_getters::Getters;

/// Kinds of guild API errors.
///
/// Represents failure conditions raised while mutating the remote guild.
/// Lookups against the cached snapshot never raise; an absent object is an
/// `Option::None`, not an error.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum GuildErrorKind {
    /// Remote API call failed (HTTP error, gateway error, network failure).
    #[display("Guild API failure: {_0}")]
    ApiFailure(String),

    /// The remote API rejected the call due to rate limiting.
    #[display("Rate limited: {_0}")]
    RateLimited(String),

    /// The bot lacks required permissions for an operation.
    #[display("Insufficient permissions: {_0}")]
    PermissionDenied(String),

    /// A channel spec referenced a parent category that does not exist.
    #[display("Missing parent category: {_0}")]
    MissingParent(String),

    /// Invalid platform identifier format (snowflake or similar).
    #[display("Invalid ID: {_0}")]
    InvalidId(String),
}

/// Guild error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Guild Error: {} at line {} in {}", kind, line, file)]
pub struct GuildError {
    kind: GuildErrorKind,
    line: u32,
    file: &'static str,
}

impl GuildError {
    /// Create a new GuildError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use lectern_error::{GuildError, GuildErrorKind};
    ///
    /// let err = GuildError::new(GuildErrorKind::RateLimited("429".to_string()));
    /// ```
    #[track_caller]
    pub fn new(kind: GuildErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for guild operations.
pub type GuildResult<T> = Result<T, GuildError>;
