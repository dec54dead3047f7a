//! The guide document.
//!
//! A derived read-model: after any structural course change the guide is
//! regenerated from scratch and published wholesale, never patched. A
//! missing guide channel skips publication without failing the handler.

use crate::SyncContext;
use lectern_core::{CourseRecord, naming};
use lectern_error::SyncResult;
use lectern_guild::{
    GuildSnapshot, channels_under, find_category_by_course_name, find_channel_by_name,
};
use tracing::{debug, instrument};

/// Render the course index from the current records and guild snapshot.
///
/// Courses are listed alphabetically under their encoded display names, so
/// lock and hidden markers show in the guide exactly as they do in the
/// category list.
pub fn render_guide(courses: &[CourseRecord], snapshot: &GuildSnapshot) -> String {
    let mut sorted: Vec<&CourseRecord> = courses.iter().collect();
    sorted.sort_by_key(|c| c.name.to_lowercase());

    let mut content = String::from("Courses\n");
    for course in sorted {
        let display = naming::encode_category_name(&course.name, course.locked, course.hidden);
        let channel_count = find_category_by_course_name(&course.name, snapshot)
            .map(|category| channels_under(category.id, snapshot).len())
            .unwrap_or(0);
        content.push_str(&format!("- {display} ({channel_count} channels)\n"));
    }
    content
}

/// Regenerate and publish the guide document.
#[instrument(skip(ctx))]
pub(crate) async fn update_guide(ctx: &SyncContext) -> SyncResult<()> {
    let courses = ctx.store.courses().await;
    let snapshot = ctx.guild.snapshot();
    let content = render_guide(&courses, &snapshot);

    match find_channel_by_name(&ctx.names.guide_channel, &snapshot) {
        Some(channel) => ctx.guild.publish_guide(channel.id, &content).await?,
        None => debug!(channel = %ctx.names.guide_channel, "No guide channel, skipping publish"),
    }
    Ok(())
}
