//! Guild capability surface for Lectern.
//!
//! The remote guild (categories, channels, roles, invites) is owned entirely
//! by the external chat platform; Lectern holds no long-lived handles to its
//! objects. This crate defines the capability trait handlers are given for
//! one invocation, plus the read-only locator and the idempotent provisioner
//! built on top of it.
//!
//! # Architecture
//!
//! - **objects**: snapshot reference types and channel/category specs
//! - **host**: the `GuildHost` trait — cached snapshot queries and remote
//!   mutations
//! - **locator**: read-only, derived-name lookups over a snapshot
//! - **provision**: find-or-create primitives that never duplicate a
//!   logical identity
//! - **memory**: in-memory `GuildHost` with an operation log; reference
//!   semantics and the test harness for handler sequencing assertions
//! - **discord**: Serenity-backed `GuildHost` (behind the `discord` feature)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "discord")]
mod discord;
mod host;
mod locator;
mod memory;
mod objects;
mod provision;

#[cfg(feature = "discord")]
pub use discord::DiscordGuild;
pub use host::{GuildHost, GuildSnapshot};
pub use locator::{
    channels_under, find_category_by_course_name, find_channel_by_name, find_role_by_name,
    find_role_by_name_ci,
};
pub use memory::{MemoryGuild, OpLog};
pub use objects::{
    CategoryRef, CategorySpec, ChannelAccess, ChannelKind, ChannelRef, ChannelSpec,
    ChannelSpecBuilder, InviteRef, RoleOverwrite, RoleRef,
};
pub use provision::{find_or_create_category, find_or_create_channel, find_or_create_role};
