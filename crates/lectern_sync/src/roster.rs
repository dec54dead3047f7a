//! Instructor promotion support.
//!
//! The command front end owns parsing and the membership mutation; the
//! primitives here enforce the membership precondition, grant the guild
//! role, and refresh invite links once the role mutation has been
//! acknowledged by the platform.

use crate::SyncContext;
use lectern_core::{CourseRecord, UserRecord, naming};
use lectern_error::{SyncError, SyncErrorKind, SyncResult};
use lectern_guild::{find_channel_by_name, find_role_by_name};
use tracing::{info, instrument, warn};

/// Grant a course's instructor role to a member.
///
/// Fails with a precondition error if the user is not already a member of
/// the course; the command layer phrases that for the end user.
#[instrument(skip(ctx, user, course), fields(user = %user.platform_id, course = %course.name))]
pub async fn promote_instructor(
    ctx: &SyncContext,
    user: &UserRecord,
    course: &CourseRecord,
) -> SyncResult<()> {
    if ctx.store.member(user.id, course.id).await.is_none() {
        return Err(SyncError::new(SyncErrorKind::NotACourseMember {
            user: user.platform_id.clone(),
            course: course.name.clone(),
        }));
    }

    let snapshot = ctx.guild.snapshot();
    match find_role_by_name(&ctx.names.instructor_role(&course.name), &snapshot) {
        Some(role) => {
            ctx.guild.add_member_role(&user.platform_id, role.id).await?;
            info!("Instructor role granted");
        }
        None => warn!("Instructor role missing from guild"),
    }
    Ok(())
}

/// Regenerate invite links on every course's announcement channel.
///
/// Invoked after role mutations settle; the platform acknowledges each role
/// call before this runs, so no fixed delay is needed.
#[instrument(skip(ctx))]
pub async fn refresh_invites(ctx: &SyncContext) -> SyncResult<()> {
    for course in ctx.store.courses().await {
        let announcement = naming::course_channel_name(&course.name, naming::ANNOUNCEMENT);
        match find_channel_by_name(&announcement, &ctx.guild.snapshot()) {
            Some(channel) => {
                ctx.guild.create_invite(channel.id).await?;
            }
            None => warn!(course = %course.name, "No announcement channel to refresh"),
        }
    }
    Ok(())
}
