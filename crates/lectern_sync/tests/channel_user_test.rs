//! Channel-level and user-level handlers.

mod common;

use common::{fixture, seed_course};
use lectern_core::{ChangeEvent, ChannelRecord, UserChanges, UserRecord};
use lectern_guild::{find_category_by_course_name, find_channel_by_name, GuildHost};

#[tokio::test]
async fn non_default_channel_nests_under_the_course_category() {
    let fx = fixture();
    let (course, channels) = seed_course(&fx, 1, "CS101");
    fx.dispatcher
        .dispatch(ChangeEvent::CourseCreated { course, channels })
        .await
        .unwrap();

    let record = ChannelRecord::new(30, 1, "CS101_homework", false);
    fx.store.put_channel(record.clone());
    fx.dispatcher
        .dispatch(ChangeEvent::ChannelCreated { channel: record })
        .await
        .unwrap();

    let snapshot = fx.guild.snapshot();
    let category = find_category_by_course_name("CS101", &snapshot).unwrap();
    let channel = find_channel_by_name("CS101_homework", &snapshot).unwrap();
    assert_eq!(channel.parent, Some(category.id));
}

#[tokio::test]
async fn default_channel_rows_are_left_to_the_course_handler() {
    let fx = fixture();
    let (course, channels) = seed_course(&fx, 1, "CS101");
    fx.dispatcher
        .dispatch(ChangeEvent::CourseCreated { course, channels })
        .await
        .unwrap();
    let created_before = fx.log.count("channel.create");

    fx.dispatcher
        .dispatch(ChangeEvent::ChannelCreated {
            channel: ChannelRecord::new(10, 1, "CS101_announcement", true),
        })
        .await
        .unwrap();

    assert_eq!(fx.log.count("channel.create"), created_before);
}

#[tokio::test]
async fn channel_for_unknown_course_is_a_precondition_failure() {
    let fx = fixture();
    let err = fx
        .dispatcher
        .dispatch(ChangeEvent::ChannelCreated {
            channel: ChannelRecord::new(30, 99, "ghost_homework", false),
        })
        .await
        .unwrap_err();
    assert!(err.is_precondition());
}

#[tokio::test]
async fn channel_rename_follows_the_previous_name() {
    let fx = fixture();
    let (course, channels) = seed_course(&fx, 1, "CS101");
    fx.dispatcher
        .dispatch(ChangeEvent::CourseCreated { course, channels })
        .await
        .unwrap();

    fx.dispatcher
        .dispatch(ChangeEvent::ChannelRenamed {
            channel: ChannelRecord::new(11, 1, "CS101_discussion", true),
            previous_name: "CS101_general".to_string(),
        })
        .await
        .unwrap();

    let snapshot = fx.guild.snapshot();
    assert!(find_channel_by_name("CS101_discussion", &snapshot).is_some());
    assert!(find_channel_by_name("CS101_general", &snapshot).is_none());
}

#[tokio::test]
async fn channel_destroy_tolerates_an_already_absent_remote() {
    let fx = fixture();
    let (course, channels) = seed_course(&fx, 1, "CS101");
    fx.dispatcher
        .dispatch(ChangeEvent::CourseCreated { course, channels })
        .await
        .unwrap();

    let event = ChangeEvent::ChannelDestroyed {
        name: "CS101_general".to_string(),
    };
    fx.dispatcher.dispatch(event.clone()).await.unwrap();
    assert_eq!(fx.log.count("channel.delete"), 1);

    // Second delivery finds nothing and skips.
    fx.dispatcher.dispatch(event).await.unwrap();
    assert_eq!(fx.log.count("channel.delete"), 1);
}

#[tokio::test]
async fn admin_and_faculty_flags_sync_independently() {
    let fx = fixture();
    let admin_role = fx.guild.seed_role("admin");
    let faculty_role = fx.guild.seed_role("faculty");

    let user = UserRecord::new(1, "4242", true, true);
    fx.dispatcher
        .dispatch(ChangeEvent::UserUpdated {
            user: user.clone(),
            changes: UserChanges {
                admin: Some(false),
                faculty: Some(false),
            },
        })
        .await
        .unwrap();
    let roles = fx.guild.member_roles("4242");
    assert!(roles.contains(&admin_role.id));
    assert!(roles.contains(&faculty_role.id));

    // Only the faculty flag changes back; the admin role must not churn.
    let demoted = UserRecord::new(1, "4242", true, false);
    fx.dispatcher
        .dispatch(ChangeEvent::UserUpdated {
            user: demoted,
            changes: UserChanges {
                admin: None,
                faculty: Some(true),
            },
        })
        .await
        .unwrap();
    let roles = fx.guild.member_roles("4242");
    assert!(roles.contains(&admin_role.id));
    assert!(!roles.contains(&faculty_role.id));
    assert_eq!(fx.log.count("member.role.add 4242"), 2);
}
