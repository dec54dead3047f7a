//! User role-flag synchronization.

use crate::SyncContext;
use lectern_core::{UserChanges, UserRecord};
use lectern_error::SyncResult;
use lectern_guild::find_role_by_name;
use tracing::{instrument, warn};

/// Mirror a user's `admin` and `faculty` flags onto guild role membership.
///
/// The flags are independent; both branches may run for one event. Only the
/// changed flag is synced, so an unrelated update never churns roles.
#[instrument(skip(ctx, user, changes), fields(user = %user.platform_id))]
pub(crate) async fn user_updated(
    ctx: &SyncContext,
    user: &UserRecord,
    changes: &UserChanges,
) -> SyncResult<()> {
    let snapshot = ctx.guild.snapshot();

    if changes.admin.is_some() {
        match find_role_by_name(&ctx.names.admin_role, &snapshot) {
            Some(role) => {
                if user.admin {
                    ctx.guild.add_member_role(&user.platform_id, role.id).await?;
                } else {
                    ctx.guild
                        .remove_member_role(&user.platform_id, role.id)
                        .await?;
                }
            }
            None => warn!(role = %ctx.names.admin_role, "Admin role missing from guild"),
        }
    }

    if changes.faculty.is_some() {
        match find_role_by_name(&ctx.names.faculty_role, &snapshot) {
            Some(role) => {
                if user.faculty {
                    ctx.guild.add_member_role(&user.platform_id, role.id).await?;
                } else {
                    ctx.guild
                        .remove_member_role(&user.platform_id, role.id)
                        .await?;
                }
            }
            None => warn!(role = %ctx.names.faculty_role, "Faculty role missing from guild"),
        }
    }

    Ok(())
}
