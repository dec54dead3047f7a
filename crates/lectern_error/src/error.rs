//! Top-level error wrapper types.

use crate::{BridgeError, GuildError, SettingsError, SyncError};

/// The foundation error enum for the Lectern workspace.
///
/// # Examples
///
/// ```
/// use lectern_error::{LecternError, BridgeError, BridgeErrorKind};
///
/// let bridge_err = BridgeError::new(BridgeErrorKind::UnknownCourse("CS101".to_string()));
/// let err: LecternError = bridge_err.into();
/// assert!(format!("{}", err).contains("Bridge Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum LecternErrorKind {
    /// Remote guild error
    #[from(GuildError)]
    Guild(GuildError),
    /// Messaging bridge error
    #[from(BridgeError)]
    Bridge(BridgeError),
    /// Reconciliation handler error
    #[from(SyncError)]
    Sync(SyncError),
    /// Configuration error
    #[from(SettingsError)]
    Settings(SettingsError),
}

/// Lectern error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Lectern Error: {}", _0)]
pub struct LecternError(Box<LecternErrorKind>);

impl LecternError {
    /// Create a new error from a kind.
    pub fn new(kind: LecternErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &LecternErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to LecternErrorKind
impl<T> From<T> for LecternError
where
    T: Into<LecternErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Lectern operations.
pub type LecternResult<T> = std::result::Result<T, LecternError>;
