//! Records delivered by the persistence layer.
//!
//! These mirror the rows the relational store holds; the store itself (schema,
//! query builders, migrations) is an external collaborator. The reconciliation
//! engine only ever sees records attached to change events or returned from
//! the read-only record store.

use serde::{Deserialize, Serialize};

/// A course row. Logical identity is the unique, mutable `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Primary key in the relational store.
    pub id: i64,
    /// Unique course name, e.g. `CS101`.
    pub name: String,
    /// Whether the course is locked (bridge blocked, lock marker shown).
    pub locked: bool,
    /// Whether the course is hidden from the course listing.
    pub hidden: bool,
}

impl CourseRecord {
    /// Create a course record.
    pub fn new(id: i64, name: impl Into<String>, locked: bool, hidden: bool) -> Self {
        Self {
            id,
            name: name.into(),
            locked,
            hidden,
        }
    }
}

/// A channel row, owned by exactly one course (cascade-deleted with it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRecord {
    /// Primary key in the relational store.
    pub id: i64,
    /// Owning course's primary key.
    pub course_id: i64,
    /// Full channel name including the course prefix, e.g. `CS101_general`.
    pub name: String,
    /// Whether this channel was auto-provisioned at course creation.
    pub default_channel: bool,
}

impl ChannelRecord {
    /// Create a channel record.
    pub fn new(id: i64, course_id: i64, name: impl Into<String>, default_channel: bool) -> Self {
        Self {
            id,
            course_id,
            name: name.into(),
            default_channel,
        }
    }
}

/// A user row, keyed by the external platform user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Primary key in the relational store.
    pub id: i64,
    /// External chat-platform user id.
    pub platform_id: String,
    /// Whether the user holds the guild-wide admin role.
    pub admin: bool,
    /// Whether the user holds the faculty role.
    pub faculty: bool,
}

impl UserRecord {
    /// Create a user record.
    pub fn new(id: i64, platform_id: impl Into<String>, admin: bool, faculty: bool) -> Self {
        Self {
            id,
            platform_id: platform_id.into(),
            admin,
            faculty,
        }
    }
}

/// Join row linking a user to a course.
///
/// A user must hold one of these before being promotable to instructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseMemberRecord {
    /// Member user's primary key.
    pub user_id: i64,
    /// Course primary key.
    pub course_id: i64,
    /// Whether the member has been promoted to instructor.
    pub instructor: bool,
}

impl CourseMemberRecord {
    /// Create a course member record.
    pub fn new(user_id: i64, course_id: i64, instructor: bool) -> Self {
        Self {
            user_id,
            course_id,
            instructor,
        }
    }
}
