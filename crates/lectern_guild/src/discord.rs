//! Serenity-backed guild host.
//!
//! Mutations go straight to the Discord REST API; the local snapshot is kept
//! write-through so lookups inside a single handler observe the handler's own
//! creates without waiting on gateway cache propagation.

use crate::{
    CategoryRef, CategorySpec, ChannelAccess, ChannelKind, ChannelRef, ChannelSpec, GuildHost,
    GuildSnapshot, InviteRef, RoleRef,
};
use async_trait::async_trait;
use lectern_error::{GuildError, GuildErrorKind, GuildResult};
use serenity::builder::{CreateChannel, CreateInvite, EditChannel, EditRole};
use serenity::http::Http;
use serenity::model::channel::{
    ChannelType, PermissionOverwrite, PermissionOverwriteType,
};
use serenity::model::id::{ChannelId, GuildId, RoleId, UserId};
use serenity::model::permissions::Permissions;
use std::sync::{Arc, RwLock};
use tracing::{info, instrument, warn};

/// `GuildHost` implementation driving a live Discord guild over REST.
pub struct DiscordGuild {
    http: Arc<Http>,
    guild_id: GuildId,
    cache: RwLock<GuildSnapshot>,
}

impl DiscordGuild {
    /// Create a host for one guild, sharing the bot's HTTP client.
    pub fn new(http: Arc<Http>, guild_id: GuildId) -> Self {
        Self {
            http,
            guild_id,
            cache: RwLock::new(GuildSnapshot::default()),
        }
    }

    /// Rebuild the local snapshot from the REST API.
    ///
    /// Called once at startup and whenever the hosting bot wants to resync;
    /// individual mutations keep the snapshot current in between.
    #[instrument(skip(self), fields(guild_id = self.guild_id.get()))]
    pub async fn refresh(&self) -> GuildResult<()> {
        let channels = self
            .http
            .get_channels(self.guild_id)
            .await
            .map_err(map_api_error)?;
        let roles = self
            .http
            .get_guild_roles(self.guild_id)
            .await
            .map_err(map_api_error)?;

        let mut snapshot = GuildSnapshot::default();
        for channel in channels {
            match channel.kind {
                ChannelType::Category => snapshot.categories.push(CategoryRef {
                    id: channel.id.get(),
                    name: channel.name.clone(),
                }),
                ChannelType::Voice => snapshot.channels.push(ChannelRef {
                    id: channel.id.get(),
                    name: channel.name.clone(),
                    parent: channel.parent_id.map(|id| id.get()),
                    kind: ChannelKind::Voice,
                }),
                _ => snapshot.channels.push(ChannelRef {
                    id: channel.id.get(),
                    name: channel.name.clone(),
                    parent: channel.parent_id.map(|id| id.get()),
                    kind: ChannelKind::Text,
                }),
            }
        }
        for role in roles {
            snapshot.roles.push(RoleRef {
                id: role.id.get(),
                name: role.name.clone(),
            });
        }

        info!(
            categories = snapshot.categories.len(),
            channels = snapshot.channels.len(),
            roles = snapshot.roles.len(),
            "Refreshed guild snapshot"
        );
        *self.cache.write().expect("snapshot lock poisoned") = snapshot;
        Ok(())
    }

    fn overwrites(&self, overwrites: &[crate::RoleOverwrite]) -> Vec<PermissionOverwrite> {
        overwrites
            .iter()
            .map(|o| {
                let (allow, deny) = match o.access {
                    ChannelAccess::Allow => (Permissions::VIEW_CHANNEL, Permissions::empty()),
                    ChannelAccess::ReadOnly => {
                        (Permissions::VIEW_CHANNEL, Permissions::SEND_MESSAGES)
                    }
                    ChannelAccess::Deny => (Permissions::empty(), Permissions::VIEW_CHANNEL),
                };
                PermissionOverwrite {
                    allow,
                    deny,
                    kind: PermissionOverwriteType::Role(RoleId::new(o.role)),
                }
            })
            .collect()
    }

    fn parse_member(&self, platform_id: &str) -> GuildResult<UserId> {
        let raw: u64 = platform_id
            .parse()
            .map_err(|_| GuildError::new(GuildErrorKind::InvalidId(platform_id.to_string())))?;
        Ok(UserId::new(raw))
    }
}

#[async_trait]
impl GuildHost for DiscordGuild {
    fn snapshot(&self) -> GuildSnapshot {
        self.cache.read().expect("snapshot lock poisoned").clone()
    }

    #[instrument(skip(self, spec), fields(channel = %spec.name))]
    async fn create_channel(&self, spec: &ChannelSpec) -> GuildResult<ChannelRef> {
        let kind = match spec.kind {
            ChannelKind::Text => ChannelType::Text,
            ChannelKind::Voice => ChannelType::Voice,
        };
        let mut builder = CreateChannel::new(&spec.name)
            .kind(kind)
            .permissions(self.overwrites(&spec.overwrites));
        if let Some(parent) = spec.parent {
            builder = builder.category(ChannelId::new(parent));
        }
        let created = self
            .guild_id
            .create_channel(&self.http, builder)
            .await
            .map_err(map_api_error)?;
        let channel = ChannelRef {
            id: created.id.get(),
            name: created.name.clone(),
            parent: created.parent_id.map(|id| id.get()),
            kind: spec.kind,
        };
        self.cache
            .write()
            .expect("snapshot lock poisoned")
            .channels
            .push(channel.clone());
        Ok(channel)
    }

    #[instrument(skip(self, spec), fields(category = %spec.name))]
    async fn create_category(&self, spec: &CategorySpec) -> GuildResult<CategoryRef> {
        let builder = CreateChannel::new(&spec.name)
            .kind(ChannelType::Category)
            .permissions(self.overwrites(&spec.overwrites));
        let created = self
            .guild_id
            .create_channel(&self.http, builder)
            .await
            .map_err(map_api_error)?;
        let category = CategoryRef {
            id: created.id.get(),
            name: created.name.clone(),
        };
        self.cache
            .write()
            .expect("snapshot lock poisoned")
            .categories
            .push(category.clone());
        Ok(category)
    }

    #[instrument(skip(self), fields(role = name))]
    async fn create_role(&self, name: &str) -> GuildResult<RoleRef> {
        let created = self
            .guild_id
            .create_role(&self.http, EditRole::new().name(name))
            .await
            .map_err(map_api_error)?;
        let role = RoleRef {
            id: created.id.get(),
            name: created.name.clone(),
        };
        self.cache
            .write()
            .expect("snapshot lock poisoned")
            .roles
            .push(role.clone());
        Ok(role)
    }

    #[instrument(skip(self))]
    async fn rename_channel(&self, id: u64, name: &str) -> GuildResult<()> {
        ChannelId::new(id)
            .edit(&self.http, EditChannel::new().name(name))
            .await
            .map_err(map_api_error)?;
        let mut cache = self.cache.write().expect("snapshot lock poisoned");
        if let Some(channel) = cache.channels.iter_mut().find(|c| c.id == id) {
            channel.name = name.to_string();
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn rename_category(&self, id: u64, name: &str) -> GuildResult<()> {
        ChannelId::new(id)
            .edit(&self.http, EditChannel::new().name(name))
            .await
            .map_err(map_api_error)?;
        let mut cache = self.cache.write().expect("snapshot lock poisoned");
        if let Some(category) = cache.categories.iter_mut().find(|c| c.id == id) {
            category.name = name.to_string();
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn rename_role(&self, id: u64, name: &str) -> GuildResult<()> {
        self.guild_id
            .edit_role(&self.http, RoleId::new(id), EditRole::new().name(name))
            .await
            .map_err(map_api_error)?;
        let mut cache = self.cache.write().expect("snapshot lock poisoned");
        if let Some(role) = cache.roles.iter_mut().find(|r| r.id == id) {
            role.name = name.to_string();
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_channel(&self, id: u64) -> GuildResult<()> {
        ChannelId::new(id)
            .delete(&self.http)
            .await
            .map_err(map_api_error)?;
        let mut cache = self.cache.write().expect("snapshot lock poisoned");
        cache.channels.retain(|c| c.id != id);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_category(&self, id: u64) -> GuildResult<()> {
        ChannelId::new(id)
            .delete(&self.http)
            .await
            .map_err(map_api_error)?;
        let mut cache = self.cache.write().expect("snapshot lock poisoned");
        cache.categories.retain(|c| c.id != id);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_role(&self, id: u64) -> GuildResult<()> {
        self.guild_id
            .delete_role(&self.http, RoleId::new(id))
            .await
            .map_err(map_api_error)?;
        let mut cache = self.cache.write().expect("snapshot lock poisoned");
        cache.roles.retain(|r| r.id != id);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn create_invite(&self, channel_id: u64) -> GuildResult<InviteRef> {
        let invite = ChannelId::new(channel_id)
            .create_invite(&self.http, CreateInvite::new().max_age(0).max_uses(0))
            .await
            .map_err(map_api_error)?;
        Ok(InviteRef {
            code: invite.code,
            channel_id,
        })
    }

    #[instrument(skip(self, order), fields(count = order.len()))]
    async fn reorder_categories(&self, order: &[u64]) -> GuildResult<()> {
        let positions = order
            .iter()
            .enumerate()
            .map(|(position, id)| (ChannelId::new(*id), position as u64));
        self.guild_id
            .reorder_channels(&self.http, positions)
            .await
            .map_err(map_api_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn add_member_role(&self, platform_id: &str, role_id: u64) -> GuildResult<()> {
        let user_id = self.parse_member(platform_id)?;
        self.http
            .add_member_role(self.guild_id, user_id, RoleId::new(role_id), None)
            .await
            .map_err(map_api_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_member_role(&self, platform_id: &str, role_id: u64) -> GuildResult<()> {
        let user_id = self.parse_member(platform_id)?;
        self.http
            .remove_member_role(self.guild_id, user_id, RoleId::new(role_id), None)
            .await
            .map_err(map_api_error)?;
        Ok(())
    }

    #[instrument(skip(self, content), fields(content_len = content.len()))]
    async fn publish_guide(&self, channel_id: u64, content: &str) -> GuildResult<()> {
        ChannelId::new(channel_id)
            .say(&self.http, content)
            .await
            .map_err(map_api_error)?;
        Ok(())
    }
}

fn map_api_error(err: serenity::Error) -> GuildError {
    if let serenity::Error::Http(serenity::http::HttpError::UnsuccessfulRequest(response)) = &err {
        return match response.status_code.as_u16() {
            429 => GuildError::new(GuildErrorKind::RateLimited(err.to_string())),
            403 => GuildError::new(GuildErrorKind::PermissionDenied(err.to_string())),
            _ => GuildError::new(GuildErrorKind::ApiFailure(err.to_string())),
        };
    }
    warn!(error = %err, "Guild API call failed");
    GuildError::new(GuildErrorKind::ApiFailure(err.to_string()))
}
