//! Snapshot reference types and object specs.
//!
//! Refs are values copied out of the host's cached snapshot, valid for the
//! scope of one handler invocation. Specs describe the desired shape of an
//! object the provisioner may have to create.

use serde::{Deserialize, Serialize};

/// A category in the guild snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    /// Platform id of the category.
    pub id: u64,
    /// Display name, including any marker glyph prefix.
    pub name: String,
}

/// Discriminates text from voice channels in specs and snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum ChannelKind {
    /// A text channel.
    Text,
    /// A voice channel.
    Voice,
}

/// A channel in the guild snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRef {
    /// Platform id of the channel.
    pub id: u64,
    /// Channel name, e.g. `CS101_announcement`.
    pub name: String,
    /// Id of the parent category, if any.
    pub parent: Option<u64>,
    /// Channel type.
    pub kind: ChannelKind,
}

/// A role in the guild snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRef {
    /// Platform id of the role.
    pub id: u64,
    /// Role name, e.g. `CS101` or `CS101 Instructor`.
    pub name: String,
}

/// An invite link created on a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteRef {
    /// Invite code.
    pub code: String,
    /// Id of the channel the invite targets.
    pub channel_id: u64,
}

/// Access granted or denied to one role on a channel or category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelAccess {
    /// Role can view and write.
    Allow,
    /// Role can view but not write.
    ReadOnly,
    /// Role cannot view.
    Deny,
}

/// A role-scoped permission overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleOverwrite {
    /// Role the overwrite applies to.
    pub role: u64,
    /// Access level granted to the role.
    pub access: ChannelAccess,
}

impl RoleOverwrite {
    /// Create an overwrite for a role.
    pub fn new(role: u64, access: ChannelAccess) -> Self {
        Self { role, access }
    }
}

/// Desired shape of a channel; the provisioner's logical identity is `name`.
#[derive(Debug, Clone, PartialEq, Eq, derive_builder::Builder)]
#[builder(setter(into), pattern = "owned")]
pub struct ChannelSpec {
    /// Channel name including the course prefix.
    pub name: String,
    /// Channel type.
    #[builder(default = "ChannelKind::Text")]
    pub kind: ChannelKind,
    /// Parent category id, if the channel nests under a course category.
    #[builder(default)]
    pub parent: Option<u64>,
    /// Role permission overwrites.
    #[builder(default)]
    pub overwrites: Vec<RoleOverwrite>,
}

impl ChannelSpec {
    /// Start building a spec for the named channel.
    pub fn builder(name: impl Into<String>) -> ChannelSpecBuilder {
        ChannelSpecBuilder::default().name(name)
    }
}

/// Desired shape of a category; the logical identity is the decoded course
/// name behind `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpec {
    /// Display name including any marker glyph prefix.
    pub name: String,
    /// Role permission overwrites applied to the category.
    pub overwrites: Vec<RoleOverwrite>,
}

impl CategorySpec {
    /// Create a category spec.
    pub fn new(name: impl Into<String>, overwrites: Vec<RoleOverwrite>) -> Self {
        Self {
            name: name.into(),
            overwrites,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_spec_builder_defaults() {
        let spec = ChannelSpec::builder("CS101_general").build().unwrap();
        assert_eq!(spec.name, "CS101_general");
        assert_eq!(spec.kind, ChannelKind::Text);
        assert!(spec.parent.is_none());
        assert!(spec.overwrites.is_empty());
    }
}
