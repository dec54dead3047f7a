//! In-memory guild host.
//!
//! `MemoryGuild` implements the full `GuildHost` contract against local
//! state, recording every mutation into a shared `OpLog`. Handler tests
//! assert ordering properties (category before channels, bridge before
//! rename) against the log; the bridge test double can share the same log so
//! cross-system ordering is observable.

use crate::{
    CategoryRef, CategorySpec, ChannelKind, ChannelRef, ChannelSpec, GuildHost, GuildSnapshot,
    InviteRef, RoleRef,
};
use async_trait::async_trait;
use lectern_error::{GuildError, GuildErrorKind, GuildResult};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Append-only record of mutations, shared between test doubles.
#[derive(Debug, Clone, Default)]
pub struct OpLog(Arc<Mutex<Vec<String>>>);

impl OpLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn record(&self, entry: impl Into<String>) {
        let entry = entry.into();
        debug!(%entry, "op");
        self.0.lock().expect("op log poisoned").push(entry);
    }

    /// Snapshot of all entries in order.
    pub fn entries(&self) -> Vec<String> {
        self.0.lock().expect("op log poisoned").clone()
    }

    /// Index of the first entry starting with `prefix`, if any.
    pub fn position(&self, prefix: &str) -> Option<usize> {
        self.0
            .lock()
            .expect("op log poisoned")
            .iter()
            .position(|e| e.starts_with(prefix))
    }

    /// Count of entries starting with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.0
            .lock()
            .expect("op log poisoned")
            .iter()
            .filter(|e| e.starts_with(prefix))
            .count()
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    next_id: u64,
    categories: Vec<CategoryRef>,
    channels: Vec<ChannelRef>,
    roles: Vec<RoleRef>,
    invites: Vec<InviteRef>,
    member_roles: HashMap<String, HashSet<u64>>,
    guide: HashMap<u64, String>,
}

impl MemoryState {
    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory `GuildHost` implementation.
#[derive(Debug, Clone)]
pub struct MemoryGuild {
    state: Arc<Mutex<MemoryState>>,
    log: OpLog,
}

impl Default for MemoryGuild {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGuild {
    /// Create an empty guild with an everyone role, its own log, and nothing
    /// else.
    pub fn new() -> Self {
        Self::with_log(OpLog::new())
    }

    /// Create an empty guild recording into a caller-supplied log.
    pub fn with_log(log: OpLog) -> Self {
        let guild = Self {
            state: Arc::new(Mutex::new(MemoryState::default())),
            log,
        };
        {
            let mut state = guild.state.lock().expect("guild state poisoned");
            let id = state.allocate();
            state.roles.push(RoleRef {
                id,
                name: "@everyone".to_string(),
            });
        }
        guild
    }

    /// The operation log this guild records into.
    pub fn log(&self) -> &OpLog {
        &self.log
    }

    /// Seed a role without logging, for test fixtures.
    pub fn seed_role(&self, name: &str) -> RoleRef {
        let mut state = self.state.lock().expect("guild state poisoned");
        let id = state.allocate();
        let role = RoleRef {
            id,
            name: name.to_string(),
        };
        state.roles.push(role.clone());
        role
    }

    /// Seed an uncategorized channel without logging, for test fixtures.
    pub fn seed_channel(&self, name: &str) -> ChannelRef {
        let mut state = self.state.lock().expect("guild state poisoned");
        let id = state.allocate();
        let channel = ChannelRef {
            id,
            name: name.to_string(),
            parent: None,
            kind: ChannelKind::Text,
        };
        state.channels.push(channel.clone());
        channel
    }

    /// Roles currently held by a member.
    pub fn member_roles(&self, platform_id: &str) -> HashSet<u64> {
        self.state
            .lock()
            .expect("guild state poisoned")
            .member_roles
            .get(platform_id)
            .cloned()
            .unwrap_or_default()
    }

    /// All invites created so far.
    pub fn invites(&self) -> Vec<InviteRef> {
        self.state
            .lock()
            .expect("guild state poisoned")
            .invites
            .clone()
    }

    /// Last guide content published to a channel.
    pub fn guide_content(&self, channel_id: u64) -> Option<String> {
        self.state
            .lock()
            .expect("guild state poisoned")
            .guide
            .get(&channel_id)
            .cloned()
    }

    fn missing(id: u64) -> GuildError {
        GuildError::new(GuildErrorKind::ApiFailure(format!("unknown object {id}")))
    }
}

#[async_trait]
impl GuildHost for MemoryGuild {
    fn snapshot(&self) -> GuildSnapshot {
        let state = self.state.lock().expect("guild state poisoned");
        GuildSnapshot {
            categories: state.categories.clone(),
            channels: state.channels.clone(),
            roles: state.roles.clone(),
        }
    }

    async fn create_channel(&self, spec: &ChannelSpec) -> GuildResult<ChannelRef> {
        let mut state = self.state.lock().expect("guild state poisoned");
        if let Some(parent) = spec.parent {
            if !state.categories.iter().any(|c| c.id == parent) {
                return Err(GuildError::new(GuildErrorKind::MissingParent(
                    spec.name.clone(),
                )));
            }
        }
        let id = state.allocate();
        let channel = ChannelRef {
            id,
            name: spec.name.clone(),
            parent: spec.parent,
            kind: spec.kind,
        };
        state.channels.push(channel.clone());
        self.log.record(format!("channel.create {}", spec.name));
        Ok(channel)
    }

    async fn create_category(&self, spec: &CategorySpec) -> GuildResult<CategoryRef> {
        let mut state = self.state.lock().expect("guild state poisoned");
        let id = state.allocate();
        let category = CategoryRef {
            id,
            name: spec.name.clone(),
        };
        state.categories.push(category.clone());
        self.log.record(format!("category.create {}", spec.name));
        Ok(category)
    }

    async fn create_role(&self, name: &str) -> GuildResult<RoleRef> {
        let mut state = self.state.lock().expect("guild state poisoned");
        let id = state.allocate();
        let role = RoleRef {
            id,
            name: name.to_string(),
        };
        state.roles.push(role.clone());
        self.log.record(format!("role.create {name}"));
        Ok(role)
    }

    async fn rename_channel(&self, id: u64, name: &str) -> GuildResult<()> {
        let mut state = self.state.lock().expect("guild state poisoned");
        let channel = state
            .channels
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Self::missing(id))?;
        let old = std::mem::replace(&mut channel.name, name.to_string());
        self.log.record(format!("channel.rename {old} -> {name}"));
        Ok(())
    }

    async fn rename_category(&self, id: u64, name: &str) -> GuildResult<()> {
        let mut state = self.state.lock().expect("guild state poisoned");
        let category = state
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Self::missing(id))?;
        let old = std::mem::replace(&mut category.name, name.to_string());
        self.log.record(format!("category.rename {old} -> {name}"));
        Ok(())
    }

    async fn rename_role(&self, id: u64, name: &str) -> GuildResult<()> {
        let mut state = self.state.lock().expect("guild state poisoned");
        let role = state
            .roles
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| Self::missing(id))?;
        let old = std::mem::replace(&mut role.name, name.to_string());
        self.log.record(format!("role.rename {old} -> {name}"));
        Ok(())
    }

    async fn delete_channel(&self, id: u64) -> GuildResult<()> {
        let mut state = self.state.lock().expect("guild state poisoned");
        let position = state
            .channels
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| Self::missing(id))?;
        let removed = state.channels.remove(position);
        self.log.record(format!("channel.delete {}", removed.name));
        Ok(())
    }

    async fn delete_category(&self, id: u64) -> GuildResult<()> {
        let mut state = self.state.lock().expect("guild state poisoned");
        let position = state
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| Self::missing(id))?;
        let removed = state.categories.remove(position);
        self.log.record(format!("category.delete {}", removed.name));
        Ok(())
    }

    async fn delete_role(&self, id: u64) -> GuildResult<()> {
        let mut state = self.state.lock().expect("guild state poisoned");
        let position = state
            .roles
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| Self::missing(id))?;
        let removed = state.roles.remove(position);
        self.log.record(format!("role.delete {}", removed.name));
        Ok(())
    }

    async fn create_invite(&self, channel_id: u64) -> GuildResult<InviteRef> {
        let mut state = self.state.lock().expect("guild state poisoned");
        if !state.channels.iter().any(|c| c.id == channel_id) {
            return Err(Self::missing(channel_id));
        }
        let code = format!("invite-{}", state.allocate());
        let invite = InviteRef {
            code,
            channel_id,
        };
        state.invites.push(invite.clone());
        self.log.record(format!("invite.create {channel_id}"));
        Ok(invite)
    }

    async fn reorder_categories(&self, order: &[u64]) -> GuildResult<()> {
        let mut state = self.state.lock().expect("guild state poisoned");
        let rank: HashMap<u64, usize> = order.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        state
            .categories
            .sort_by_key(|c| rank.get(&c.id).copied().unwrap_or(usize::MAX));
        self.log.record("category.reorder");
        Ok(())
    }

    async fn add_member_role(&self, platform_id: &str, role_id: u64) -> GuildResult<()> {
        let mut state = self.state.lock().expect("guild state poisoned");
        if !state.roles.iter().any(|r| r.id == role_id) {
            return Err(Self::missing(role_id));
        }
        state
            .member_roles
            .entry(platform_id.to_string())
            .or_default()
            .insert(role_id);
        self.log.record(format!("member.role.add {platform_id} {role_id}"));
        Ok(())
    }

    async fn remove_member_role(&self, platform_id: &str, role_id: u64) -> GuildResult<()> {
        let mut state = self.state.lock().expect("guild state poisoned");
        if let Some(roles) = state.member_roles.get_mut(platform_id) {
            roles.remove(&role_id);
        }
        self.log
            .record(format!("member.role.remove {platform_id} {role_id}"));
        Ok(())
    }

    async fn publish_guide(&self, channel_id: u64, content: &str) -> GuildResult<()> {
        let mut state = self.state.lock().expect("guild state poisoned");
        if !state.channels.iter().any(|c| c.id == channel_id) {
            return Err(Self::missing(channel_id));
        }
        state.guide.insert(channel_id, content.to_string());
        self.log.record(format!("guide.publish {channel_id}"));
        Ok(())
    }
}
