//! Course lifecycle handlers.
//!
//! A course's guild projection moves through `{absent, provisioning,
//! active(locked, hidden)}`. Bulk create drives absent → active; lock and
//! visibility toggles re-encode the category name in place; destroy tears
//! the projection down channels-first so the category is never orphaned
//! above live channels.

use crate::{SyncContext, bridge, guide};
use futures::future::join_all;
use lectern_core::{ChannelRecord, CourseChanges, CourseRecord, naming};
use lectern_error::SyncResult;
use lectern_guild::{
    CategorySpec, ChannelAccess, ChannelKind, ChannelSpec, GuildSnapshot, RoleOverwrite, RoleRef,
    channels_under, find_category_by_course_name, find_channel_by_name, find_role_by_name,
    find_or_create_category, find_or_create_channel, find_or_create_role,
};
use tracing::{debug, info, instrument, warn};

/// Provision the full guild projection for a newly created course.
///
/// Order matters: roles exist before the category's permission overwrites
/// are computed, and the category exists before channels nest under it.
/// Default channel creation itself fans out unordered.
#[instrument(skip(ctx, course, channels), fields(course = %course.name))]
pub(crate) async fn course_created(
    ctx: &SyncContext,
    course: &CourseRecord,
    channels: &[ChannelRecord],
) -> SyncResult<()> {
    let student = find_or_create_role(ctx.guild.as_ref(), &course.name).await?;
    let instructor =
        find_or_create_role(ctx.guild.as_ref(), &ctx.names.instructor_role(&course.name)).await?;

    let overwrites = category_overwrites(&ctx.guild.snapshot(), &student, &instructor);
    let category_name = naming::encode_category_name(&course.name, course.locked, course.hidden);
    let category =
        find_or_create_category(ctx.guild.as_ref(), &CategorySpec::new(category_name, overwrites))
            .await?;

    let specs: Vec<ChannelSpec> = channels
        .iter()
        .map(|record| default_channel_spec(record, course, category.id, &student, &instructor))
        .collect();
    let created = join_all(
        specs
            .iter()
            .map(|spec| find_or_create_channel(ctx.guild.as_ref(), spec)),
    )
    .await;
    for result in created {
        result?;
    }

    sort_categories(ctx).await?;

    let announcement = naming::course_channel_name(&course.name, naming::ANNOUNCEMENT);
    match find_channel_by_name(&announcement, &ctx.guild.snapshot()) {
        Some(channel) => {
            ctx.guild.create_invite(channel.id).await?;
        }
        None => warn!(%announcement, "No announcement channel to invite into"),
    }

    ctx.bridge.track(&course.name).await?;
    notify_courses_changed(ctx).await?;
    guide::update_guide(ctx).await?;

    info!(channels = channels.len(), "Course provisioned");
    Ok(())
}

/// React to a course row update: lock toggle, visibility toggle, or rename.
///
/// The branches are mutually exclusive per event; the store serializes
/// field-level changes into separate notifications. The guide is rewritten
/// after every branch.
#[instrument(skip(ctx, course, changes), fields(course = %course.name))]
pub(crate) async fn course_updated(
    ctx: &SyncContext,
    course: &CourseRecord,
    changes: &CourseChanges,
) -> SyncResult<()> {
    if changes.locked.is_some() {
        // Bridge state changes before the visible name, so observers never
        // see unlocked naming while the bridge still blocks.
        if course.locked {
            bridge::lock_course(ctx.bridge.as_ref(), &course.name).await?;
        } else {
            bridge::unlock_course(ctx.bridge.as_ref(), &course.name).await?;
        }
        recode_category(ctx, course).await?;
    } else if changes.hidden.is_some() {
        recode_category(ctx, course).await?;
    } else if let Some(previous) = &changes.name {
        rename_course(ctx, course, previous).await?;
    }

    guide::update_guide(ctx).await?;
    Ok(())
}

/// Tear down a destroyed course's projection.
///
/// Channels first, then the category, then both roles. A category that is
/// already gone is tolerated; role and guide cleanup still proceed.
#[instrument(skip(ctx))]
pub(crate) async fn course_destroyed(ctx: &SyncContext, name: &str) -> SyncResult<()> {
    let snapshot = ctx.guild.snapshot();

    if let Some(category) = find_category_by_course_name(name, &snapshot) {
        let deletions = channels_under(category.id, &snapshot)
            .into_iter()
            .map(|channel| ctx.guild.delete_channel(channel.id));
        for result in join_all(deletions).await {
            result?;
        }
        ctx.guild.delete_category(category.id).await?;
    } else {
        debug!("Category already absent, skipping channel teardown");
    }

    let instructor_name = ctx.names.instructor_role(name);
    let lowered = name.to_lowercase();
    let doomed: Vec<u64> = snapshot
        .roles
        .iter()
        .filter(|role| role.name == instructor_name || role.name.to_lowercase() == lowered)
        .map(|role| role.id)
        .collect();
    for role_id in doomed {
        ctx.guild.delete_role(role_id).await?;
    }

    ctx.bridge.forget(name).await?;
    guide::update_guide(ctx).await?;

    info!("Course projection removed");
    Ok(())
}

/// Re-encode the category name from the course's current state flags.
async fn recode_category(ctx: &SyncContext, course: &CourseRecord) -> SyncResult<()> {
    let snapshot = ctx.guild.snapshot();
    match find_category_by_course_name(&course.name, &snapshot) {
        Some(category) => {
            let encoded =
                naming::encode_category_name(&course.name, course.locked, course.hidden);
            ctx.guild.rename_category(category.id, &encoded).await?;
        }
        None => warn!("No category to re-encode"),
    }
    Ok(())
}

/// Propagate a course rename: category, both roles, category order,
/// dependent channels, and a fresh announcement invite.
async fn rename_course(
    ctx: &SyncContext,
    course: &CourseRecord,
    previous: &str,
) -> SyncResult<()> {
    let snapshot = ctx.guild.snapshot();

    // The old category's marker prefix carries the lock/hidden state; the
    // rename must not reset it.
    match find_category_by_course_name(previous, &snapshot) {
        Some(category) => {
            let prefix = naming::marker_prefix(&category.name);
            ctx.guild
                .rename_category(category.id, &naming::compose(&prefix, &course.name))
                .await?;
        }
        None => warn!(%previous, "No category under previous name"),
    }

    if let Some(role) = lectern_guild::find_role_by_name_ci(previous, &snapshot) {
        ctx.guild.rename_role(role.id, &course.name).await?;
    }
    if let Some(role) = find_role_by_name(&ctx.names.instructor_role(previous), &snapshot) {
        ctx.guild
            .rename_role(role.id, &ctx.names.instructor_role(&course.name))
            .await?;
    }

    sort_categories(ctx).await?;

    for record in ctx.store.channels_of_course(course.id).await {
        let suffix = record
            .name
            .strip_prefix(&format!("{}_", course.name))
            .or_else(|| record.name.strip_prefix(&format!("{previous}_")));
        let Some(suffix) = suffix else {
            warn!(channel = %record.name, "Channel name carries no course prefix");
            continue;
        };
        let old_name = naming::course_channel_name(previous, suffix);
        let new_name = naming::course_channel_name(&course.name, suffix);
        if let Some(remote) = find_channel_by_name(&old_name, &ctx.guild.snapshot()) {
            ctx.guild.rename_channel(remote.id, &new_name).await?;
        }
    }

    // The old invite dies with the old link text only; the channel persists,
    // so a fresh invite on the renamed announcement channel replaces it.
    let announcement = naming::course_channel_name(&course.name, naming::ANNOUNCEMENT);
    if let Some(channel) = find_channel_by_name(&announcement, &ctx.guild.snapshot()) {
        ctx.guild.create_invite(channel.id).await?;
    }

    Ok(())
}

/// Reposition categories alphabetically by decoded course name.
pub(crate) async fn sort_categories(ctx: &SyncContext) -> SyncResult<()> {
    let snapshot = ctx.guild.snapshot();
    let mut keyed: Vec<(String, u64)> = snapshot
        .categories
        .iter()
        .map(|c| (naming::decode_course_name(&c.name).to_lowercase(), c.id))
        .collect();
    keyed.sort();
    let order: Vec<u64> = keyed.into_iter().map(|(_, id)| id).collect();
    ctx.guild.reorder_categories(&order).await?;
    Ok(())
}

/// Push the current course list to the bridge relay.
async fn notify_courses_changed(ctx: &SyncContext) -> SyncResult<()> {
    let names: Vec<String> = ctx
        .store
        .courses()
        .await
        .into_iter()
        .map(|c| c.name)
        .collect();
    ctx.bridge.refresh_courses(&names).await?;
    Ok(())
}

/// Category overwrites: hidden from everyone, visible to the course's
/// student and instructor roles.
fn category_overwrites(
    snapshot: &GuildSnapshot,
    student: &RoleRef,
    instructor: &RoleRef,
) -> Vec<RoleOverwrite> {
    let mut overwrites = vec![
        RoleOverwrite::new(student.id, ChannelAccess::Allow),
        RoleOverwrite::new(instructor.id, ChannelAccess::Allow),
    ];
    match find_role_by_name("@everyone", snapshot) {
        Some(everyone) => overwrites.insert(0, RoleOverwrite::new(everyone.id, ChannelAccess::Deny)),
        None => warn!("No everyone role in snapshot"),
    }
    overwrites
}

/// Spec for one auto-provisioned channel. The announcement channel is
/// read-only for students.
fn default_channel_spec(
    record: &ChannelRecord,
    course: &CourseRecord,
    category_id: u64,
    student: &RoleRef,
    instructor: &RoleRef,
) -> ChannelSpec {
    let announcement = naming::course_channel_name(&course.name, naming::ANNOUNCEMENT);
    let overwrites = if record.name == announcement {
        vec![
            RoleOverwrite::new(student.id, ChannelAccess::ReadOnly),
            RoleOverwrite::new(instructor.id, ChannelAccess::Allow),
        ]
    } else {
        Vec::new()
    };
    ChannelSpec {
        name: record.name.clone(),
        kind: ChannelKind::Text,
        parent: Some(category_id),
        overwrites,
    }
}
