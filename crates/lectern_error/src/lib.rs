//! Error types for the Lectern course/guild reconciliation engine.
//!
//! This crate provides the foundation error types used throughout the Lectern
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use lectern_error::{GuildError, GuildErrorKind, LecternResult};
//!
//! fn provision() -> LecternResult<()> {
//!     Err(GuildError::new(GuildErrorKind::ApiFailure(
//!         "rate limit exceeded".to_string(),
//!     )))?
//! }
//!
//! assert!(provision().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bridge;
mod error;
mod guild;
mod settings;
mod sync;

pub use bridge::{BridgeError, BridgeErrorKind, BridgeResult};
pub use error::{LecternError, LecternErrorKind, LecternResult};
pub use guild::{GuildError, GuildErrorKind, GuildResult};
pub use settings::{SettingsError, SettingsErrorKind};
pub use sync::{SyncError, SyncErrorKind, SyncResult};
