//! Domain records, lifecycle events, and the naming codec for Lectern.
//!
//! The relational store is the single source of truth for courses, channels,
//! and users; this crate defines the records it delivers, the typed change
//! events the dispatcher consumes, and the pure codec that maps a course's
//! logical name and state flags onto its guild-visible category name.
//!
//! Nothing in this crate performs I/O; the guild capability surface lives in
//! `lectern_guild` and the handlers in `lectern_sync`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod events;
pub mod naming;
mod records;
mod settings;

pub use events::{ChangeEvent, ChangeEventKind, CourseChanges, UserChanges};
pub use records::{ChannelRecord, CourseMemberRecord, CourseRecord, UserRecord};
pub use settings::GuildNames;
