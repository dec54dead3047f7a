//! Typed lifecycle change events.
//!
//! The persistence layer notifies the dispatcher after each settled mutation
//! with the affected record(s), which fields changed, and the previous values
//! of changed fields. Events are an explicit enum rather than dynamic hook
//! registration so handlers stay testable without any persistence framework.

use crate::{ChannelRecord, CourseRecord, UserRecord};

/// Previous values of changed course fields.
///
/// A `Some` field means the field changed in this event and carries the value
/// it held before the mutation; `None` means unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseChanges {
    /// Previous course name, when the name changed.
    pub name: Option<String>,
    /// Previous lock state, when `locked` changed.
    pub locked: Option<bool>,
    /// Previous visibility state, when `hidden` changed.
    pub hidden: Option<bool>,
}

impl CourseChanges {
    /// A change set marking only the name as changed.
    pub fn renamed(previous: impl Into<String>) -> Self {
        Self {
            name: Some(previous.into()),
            ..Self::default()
        }
    }

    /// A change set marking only the lock flag as changed.
    pub fn lock_toggled(previous: bool) -> Self {
        Self {
            locked: Some(previous),
            ..Self::default()
        }
    }

    /// A change set marking only the hidden flag as changed.
    pub fn visibility_toggled(previous: bool) -> Self {
        Self {
            hidden: Some(previous),
            ..Self::default()
        }
    }
}

/// Previous values of changed user flags. Both may change in one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    /// Previous admin flag, when `admin` changed.
    pub admin: Option<bool>,
    /// Previous faculty flag, when `faculty` changed.
    pub faculty: Option<bool>,
}

/// A settled mutation on the relational store.
///
/// One event maps to one handler invocation; the dispatcher routes on the
/// variant. Destroy events carry names rather than records because the rows
/// are already gone when the notification fires.
#[derive(Debug, Clone, strum::EnumDiscriminants)]
#[strum_discriminants(name(ChangeEventKind))]
#[strum_discriminants(derive(strum::Display, Hash))]
pub enum ChangeEvent {
    /// A course and its default channel set were inserted in bulk.
    CourseCreated {
        /// The new course row.
        course: CourseRecord,
        /// The default channels inserted alongside it.
        channels: Vec<ChannelRecord>,
    },
    /// A course row was updated (rename, lock toggle, or visibility toggle).
    CourseUpdated {
        /// The course row after the mutation.
        course: CourseRecord,
        /// Which fields changed, with previous values.
        changes: CourseChanges,
    },
    /// A course row was destroyed, cascading to its channels.
    CourseDestroyed {
        /// Name of the destroyed course.
        name: String,
    },
    /// A single channel row was inserted. The owning course is resolved
    /// through the record store by `course_id`.
    ChannelCreated {
        /// The new channel row.
        channel: ChannelRecord,
    },
    /// A channel row was renamed.
    ChannelRenamed {
        /// The channel row after the mutation.
        channel: ChannelRecord,
        /// The channel's name before the mutation.
        previous_name: String,
    },
    /// Channel rows were destroyed in bulk, matched by name.
    ChannelDestroyed {
        /// Name of the destroyed channel.
        name: String,
    },
    /// A user row's role flags were updated.
    UserUpdated {
        /// The user row after the mutation.
        user: UserRecord,
        /// Which flags changed, with previous values.
        changes: UserChanges,
    },
}

impl ChangeEvent {
    /// The event's kind discriminant, for routing and logging.
    pub fn kind(&self) -> ChangeEventKind {
        self.into()
    }
}
