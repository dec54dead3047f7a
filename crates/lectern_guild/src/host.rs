//! The guild capability trait.

use crate::{CategoryRef, CategorySpec, ChannelRef, ChannelSpec, InviteRef, RoleRef};
use async_trait::async_trait;
use lectern_error::GuildResult;
use serde::{Deserialize, Serialize};

/// A point-in-time copy of the guild's cached object graph.
///
/// The hosting SDK keeps the underlying cache fresh; the staleness window is
/// whatever it guarantees. Lookups over a snapshot never reach the network.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuildSnapshot {
    /// Categories, in display order.
    pub categories: Vec<CategoryRef>,
    /// Channels across all categories.
    pub channels: Vec<ChannelRef>,
    /// Roles, including the platform's everyone role.
    pub roles: Vec<RoleRef>,
}

/// Capability handle to the live guild, passed explicitly into each handler
/// invocation.
///
/// Mutations are the handler's only suspension points. Implementations do not
/// retry; rate limits and permission failures surface as `GuildError` and
/// abort the remainder of the calling handler.
#[async_trait]
pub trait GuildHost: Send + Sync {
    /// Snapshot the cached object graph. Read-only, no remote calls.
    fn snapshot(&self) -> GuildSnapshot;

    /// Create a text or voice channel from a spec.
    async fn create_channel(&self, spec: &ChannelSpec) -> GuildResult<ChannelRef>;

    /// Create a category from a spec.
    async fn create_category(&self, spec: &CategorySpec) -> GuildResult<CategoryRef>;

    /// Create a role with the given name.
    async fn create_role(&self, name: &str) -> GuildResult<RoleRef>;

    /// Rename a channel.
    async fn rename_channel(&self, id: u64, name: &str) -> GuildResult<()>;

    /// Rename a category.
    async fn rename_category(&self, id: u64, name: &str) -> GuildResult<()>;

    /// Rename a role.
    async fn rename_role(&self, id: u64, name: &str) -> GuildResult<()>;

    /// Delete a channel.
    async fn delete_channel(&self, id: u64) -> GuildResult<()>;

    /// Delete a category. Channels underneath it must be deleted first.
    async fn delete_category(&self, id: u64) -> GuildResult<()>;

    /// Delete a role.
    async fn delete_role(&self, id: u64) -> GuildResult<()>;

    /// Create a non-expiring invite link on a channel.
    async fn create_invite(&self, channel_id: u64) -> GuildResult<InviteRef>;

    /// Reposition categories into the given id order.
    async fn reorder_categories(&self, order: &[u64]) -> GuildResult<()>;

    /// Grant a role to a guild member, keyed by platform user id.
    async fn add_member_role(&self, platform_id: &str, role_id: u64) -> GuildResult<()>;

    /// Revoke a role from a guild member, keyed by platform user id.
    async fn remove_member_role(&self, platform_id: &str, role_id: u64) -> GuildResult<()>;

    /// Replace the contents of the guide channel with `content`.
    async fn publish_guide(&self, channel_id: u64, content: &str) -> GuildResult<()>;
}
