//! Configuration error types.

use derive_getters::Getters;

/// Kinds of settings errors.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum SettingsErrorKind {
    /// Failed to read a configuration source.
    #[display("Failed to read configuration: {_0}")]
    Read(String),

    /// Configuration contents failed to deserialize.
    #[display("Failed to parse configuration: {_0}")]
    Parse(String),
}

/// Settings error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Settings Error: {} at line {} in {}", kind, line, file)]
pub struct SettingsError {
    kind: SettingsErrorKind,
    line: u32,
    file: &'static str,
}

impl SettingsError {
    /// Create a new SettingsError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SettingsErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
