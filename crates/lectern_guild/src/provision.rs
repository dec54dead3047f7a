//! Idempotent find-or-create primitives.
//!
//! Each primitive looks the object up in the cached snapshot by its derived
//! name first and only issues a create call on absence, so re-running a
//! handler against a partially provisioned guild converges instead of
//! duplicating. Callers serialize creates that target the same name within
//! one handler invocation; there is no cross-handler locking.

use crate::{
    CategoryRef, CategorySpec, ChannelRef, ChannelSpec, GuildHost, RoleRef,
    find_channel_by_name, find_role_by_name, locator,
};
use lectern_core::naming;
use lectern_error::GuildResult;
use tracing::{debug, info, instrument};

/// Return the channel matching the spec's name, creating it if absent.
#[instrument(skip(host, spec), fields(channel = %spec.name))]
pub async fn find_or_create_channel(
    host: &dyn GuildHost,
    spec: &ChannelSpec,
) -> GuildResult<ChannelRef> {
    if let Some(existing) = find_channel_by_name(&spec.name, &host.snapshot()) {
        debug!(id = existing.id, "Channel already provisioned");
        return Ok(existing.clone());
    }
    let created = host.create_channel(spec).await?;
    info!(id = created.id, "Created channel");
    Ok(created)
}

/// Return the category matching the spec's decoded course name, creating it
/// if absent.
///
/// Matching decodes marker glyphs, so a category that changed lock state
/// since the spec was computed still counts as the same logical identity.
#[instrument(skip(host, spec), fields(category = %spec.name))]
pub async fn find_or_create_category(
    host: &dyn GuildHost,
    spec: &CategorySpec,
) -> GuildResult<CategoryRef> {
    let course_name = naming::decode_course_name(&spec.name);
    if let Some(existing) = locator::find_category_by_course_name(&course_name, &host.snapshot()) {
        debug!(id = existing.id, "Category already provisioned");
        return Ok(existing.clone());
    }
    let created = host.create_category(spec).await?;
    info!(id = created.id, "Created category");
    Ok(created)
}

/// Return the role with the given name, creating it if absent.
#[instrument(skip(host), fields(role = name))]
pub async fn find_or_create_role(host: &dyn GuildHost, name: &str) -> GuildResult<RoleRef> {
    if let Some(existing) = find_role_by_name(name, &host.snapshot()) {
        debug!(id = existing.id, "Role already provisioned");
        return Ok(existing.clone());
    }
    let created = host.create_role(name).await?;
    info!(id = created.id, "Created role");
    Ok(created)
}
