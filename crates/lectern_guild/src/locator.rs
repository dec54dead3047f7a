//! Read-only lookups over a guild snapshot.
//!
//! Every lookup is a linear scan of the cached snapshot; guild object counts
//! are small and calls are infrequent relative to guild-API latency, so no
//! index is kept. At most one match is returned; absence is `None`, never an
//! error.

use crate::{CategoryRef, ChannelRef, GuildSnapshot, RoleRef};
use lectern_core::naming;

/// Find the category whose decoded display name matches the course name.
///
/// Marker glyphs on the category are stripped before comparison, so a locked
/// or hidden course still resolves by its logical name.
pub fn find_category_by_course_name<'a>(
    course_name: &str,
    snapshot: &'a GuildSnapshot,
) -> Option<&'a CategoryRef> {
    snapshot
        .categories
        .iter()
        .find(|c| naming::decode_course_name(&c.name) == course_name)
}

/// Find a channel by exact name.
pub fn find_channel_by_name<'a>(name: &str, snapshot: &'a GuildSnapshot) -> Option<&'a ChannelRef> {
    snapshot.channels.iter().find(|c| c.name == name)
}

/// Find a role by exact name.
pub fn find_role_by_name<'a>(name: &str, snapshot: &'a GuildSnapshot) -> Option<&'a RoleRef> {
    snapshot.roles.iter().find(|r| r.name == name)
}

/// Find a role by case-insensitive name.
///
/// Course student roles carry the raw course name and are matched
/// case-insensitively on cascade delete.
pub fn find_role_by_name_ci<'a>(name: &str, snapshot: &'a GuildSnapshot) -> Option<&'a RoleRef> {
    let needle = name.to_lowercase();
    snapshot
        .roles
        .iter()
        .find(|r| r.name.to_lowercase() == needle)
}

/// All channels parented under the given category.
pub fn channels_under<'a>(category_id: u64, snapshot: &'a GuildSnapshot) -> Vec<&'a ChannelRef> {
    snapshot
        .channels
        .iter()
        .filter(|c| c.parent == Some(category_id))
        .collect()
}
