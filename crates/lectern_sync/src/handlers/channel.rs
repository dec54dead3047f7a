//! Channel lifecycle handlers.
//!
//! Default channels are provisioned by the course handler; these cover
//! instructor-added channels and individual renames/deletes.

use crate::SyncContext;
use lectern_core::ChannelRecord;
use lectern_error::{SyncError, SyncErrorKind, SyncResult};
use lectern_guild::{
    ChannelKind, ChannelSpec, find_category_by_course_name, find_channel_by_name,
    find_or_create_channel,
};
use tracing::{debug, instrument, warn};

/// Provision the remote channel for a newly created non-default channel row.
#[instrument(skip(ctx, channel), fields(channel = %channel.name))]
pub(crate) async fn channel_created(ctx: &SyncContext, channel: &ChannelRecord) -> SyncResult<()> {
    if channel.default_channel {
        debug!("Default channel, provisioned by the course handler");
        return Ok(());
    }

    let course = ctx
        .store
        .course_by_id(channel.course_id)
        .await
        .ok_or_else(|| {
            SyncError::new(SyncErrorKind::CourseMissing(format!(
                "course id {}",
                channel.course_id
            )))
        })?;

    let snapshot = ctx.guild.snapshot();
    let parent = find_category_by_course_name(&course.name, &snapshot).map(|c| c.id);
    if parent.is_none() {
        warn!(course = %course.name, "No category for course, creating channel unparented");
    }

    let spec = ChannelSpec {
        name: channel.name.clone(),
        kind: ChannelKind::Text,
        parent,
        overwrites: Vec::new(),
    };
    find_or_create_channel(ctx.guild.as_ref(), &spec).await?;
    Ok(())
}

/// Rename the remote channel matching the record's previous name.
#[instrument(skip(ctx, channel), fields(channel = %channel.name, previous = previous_name))]
pub(crate) async fn channel_renamed(
    ctx: &SyncContext,
    channel: &ChannelRecord,
    previous_name: &str,
) -> SyncResult<()> {
    let snapshot = ctx.guild.snapshot();
    match find_channel_by_name(previous_name, &snapshot) {
        Some(remote) => ctx.guild.rename_channel(remote.id, &channel.name).await?,
        None => warn!("No remote channel under previous name"),
    }
    Ok(())
}

/// Delete the remote channel matching a destroyed record, if it still exists.
#[instrument(skip(ctx))]
pub(crate) async fn channel_destroyed(ctx: &SyncContext, name: &str) -> SyncResult<()> {
    let snapshot = ctx.guild.snapshot();
    match find_channel_by_name(name, &snapshot) {
        Some(remote) => ctx.guild.delete_channel(remote.id).await?,
        None => debug!("Remote channel already absent"),
    }
    Ok(())
}
