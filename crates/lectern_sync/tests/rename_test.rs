//! Course rename propagation.

mod common;

use common::{fixture, seed_course};
use lectern_core::{ChangeEvent, ChannelRecord, CourseChanges, CourseRecord};
use lectern_guild::{find_category_by_course_name, find_channel_by_name, find_role_by_name, GuildHost};

#[tokio::test]
async fn rename_preserves_lock_and_hidden_markers() {
    let fx = fixture();
    let (course, channels) = seed_course(&fx, 1, "CS101");
    fx.dispatcher
        .dispatch(ChangeEvent::CourseCreated { course, channels })
        .await
        .unwrap();

    // Lock, then hide.
    let locked = CourseRecord::new(1, "CS101", true, false);
    fx.store.put_course(locked.clone());
    fx.dispatcher
        .dispatch(ChangeEvent::CourseUpdated {
            course: locked,
            changes: CourseChanges::lock_toggled(false),
        })
        .await
        .unwrap();
    let hidden = CourseRecord::new(1, "CS101", true, true);
    fx.store.put_course(hidden.clone());
    fx.dispatcher
        .dispatch(ChangeEvent::CourseUpdated {
            course: hidden,
            changes: CourseChanges::visibility_toggled(false),
        })
        .await
        .unwrap();

    let renamed = CourseRecord::new(1, "CS102", true, true);
    fx.store.put_course(renamed.clone());
    fx.dispatcher
        .dispatch(ChangeEvent::CourseUpdated {
            course: renamed,
            changes: CourseChanges::renamed("CS101"),
        })
        .await
        .unwrap();

    let snapshot = fx.guild.snapshot();
    let category = find_category_by_course_name("CS102", &snapshot).unwrap();
    assert_eq!(category.name, "🔒🙈 CS102");
    assert!(find_category_by_course_name("CS101", &snapshot).is_none());
}

#[tokio::test]
async fn rename_propagates_to_roles_channels_and_invite() {
    let fx = fixture();
    let (course, channels) = seed_course(&fx, 1, "CS101");
    fx.dispatcher
        .dispatch(ChangeEvent::CourseCreated { course, channels })
        .await
        .unwrap();
    let invites_before = fx.guild.invites().len();

    // The store has already applied the cascade rename to channel rows.
    let renamed = CourseRecord::new(1, "CS102", false, false);
    fx.store.put_course(renamed.clone());
    fx.store
        .put_channel(ChannelRecord::new(10, 1, "CS102_announcement", true));
    fx.store
        .put_channel(ChannelRecord::new(11, 1, "CS102_general", true));

    fx.dispatcher
        .dispatch(ChangeEvent::CourseUpdated {
            course: renamed,
            changes: CourseChanges::renamed("CS101"),
        })
        .await
        .unwrap();

    let snapshot = fx.guild.snapshot();
    assert!(find_role_by_name("CS102", &snapshot).is_some());
    assert!(find_role_by_name("CS102 Instructor", &snapshot).is_some());
    assert!(find_role_by_name("CS101", &snapshot).is_none());
    assert!(find_channel_by_name("CS102_announcement", &snapshot).is_some());
    assert!(find_channel_by_name("CS102_general", &snapshot).is_some());
    assert!(find_channel_by_name("CS101_announcement", &snapshot).is_none());

    // A fresh invite replaces the old link on the continuing channel.
    assert_eq!(fx.guild.invites().len(), invites_before + 1);
}
