//! Read-only record store contract.
//!
//! The persistence layer owns the schema and queries; handlers only need
//! these lookups. `MemoryStore` backs the tests and doubles as the contract's
//! reference semantics.

use async_trait::async_trait;
use lectern_core::{ChannelRecord, CourseMemberRecord, CourseRecord};
use std::sync::Mutex;

/// Lookups the reconciliation handlers perform against the relational store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Course by primary key.
    async fn course_by_id(&self, id: i64) -> Option<CourseRecord>;

    /// Course by unique name.
    async fn course_by_name(&self, name: &str) -> Option<CourseRecord>;

    /// All courses.
    async fn courses(&self) -> Vec<CourseRecord>;

    /// Channels belonging to a course.
    async fn channels_of_course(&self, course_id: i64) -> Vec<ChannelRecord>;

    /// Membership row for a user in a course, if any.
    async fn member(&self, user_id: i64, course_id: i64) -> Option<CourseMemberRecord>;
}

#[derive(Debug, Default)]
struct StoreState {
    courses: Vec<CourseRecord>,
    channels: Vec<ChannelRecord>,
    members: Vec<CourseMemberRecord>,
}

/// In-memory `RecordStore` for tests and examples.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a course row.
    pub fn put_course(&self, course: CourseRecord) {
        let mut state = self.state.lock().expect("store poisoned");
        state.courses.retain(|c| c.id != course.id);
        state.courses.push(course);
    }

    /// Remove a course row and its channels, mirroring cascade delete.
    pub fn remove_course(&self, id: i64) {
        let mut state = self.state.lock().expect("store poisoned");
        state.courses.retain(|c| c.id != id);
        state.channels.retain(|c| c.course_id != id);
    }

    /// Insert or replace a channel row.
    pub fn put_channel(&self, channel: ChannelRecord) {
        let mut state = self.state.lock().expect("store poisoned");
        state.channels.retain(|c| c.id != channel.id);
        state.channels.push(channel);
    }

    /// Insert or replace a membership row.
    pub fn put_member(&self, member: CourseMemberRecord) {
        let mut state = self.state.lock().expect("store poisoned");
        state
            .members
            .retain(|m| !(m.user_id == member.user_id && m.course_id == member.course_id));
        state.members.push(member);
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn course_by_id(&self, id: i64) -> Option<CourseRecord> {
        self.state
            .lock()
            .expect("store poisoned")
            .courses
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    async fn course_by_name(&self, name: &str) -> Option<CourseRecord> {
        self.state
            .lock()
            .expect("store poisoned")
            .courses
            .iter()
            .find(|c| c.name == name)
            .cloned()
    }

    async fn courses(&self) -> Vec<CourseRecord> {
        self.state.lock().expect("store poisoned").courses.clone()
    }

    async fn channels_of_course(&self, course_id: i64) -> Vec<ChannelRecord> {
        self.state
            .lock()
            .expect("store poisoned")
            .channels
            .iter()
            .filter(|c| c.course_id == course_id)
            .cloned()
            .collect()
    }

    async fn member(&self, user_id: i64, course_id: i64) -> Option<CourseMemberRecord> {
        self.state
            .lock()
            .expect("store poisoned")
            .members
            .iter()
            .find(|m| m.user_id == user_id && m.course_id == course_id)
            .cloned()
    }
}
