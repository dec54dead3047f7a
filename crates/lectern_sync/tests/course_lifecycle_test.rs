//! Course bulk-create and destroy against the in-memory guild.

mod common;

use common::{fixture, seed_course};
use lectern_core::ChangeEvent;
use lectern_guild::{find_category_by_course_name, GuildHost};

#[tokio::test]
async fn bulk_create_provisions_roles_category_channels_invite() {
    let fx = fixture();
    let (course, channels) = seed_course(&fx, 1, "CS101");

    fx.dispatcher
        .dispatch(ChangeEvent::CourseCreated { course, channels })
        .await
        .unwrap();

    assert_eq!(fx.log.count("role.create"), 2);
    assert_eq!(fx.log.count("category.create"), 1);
    assert_eq!(fx.log.count("channel.create"), 2);
    assert_eq!(fx.log.count("invite.create"), 1);

    // Dependency order: roles before the category (overwrites need the role
    // ids), category before its channels, invite after the channels exist.
    let role = fx.log.position("role.create").unwrap();
    let category = fx.log.position("category.create").unwrap();
    let channel = fx.log.position("channel.create").unwrap();
    let invite = fx.log.position("invite.create").unwrap();
    assert!(role < category);
    assert!(category < channel);
    assert!(channel < invite);

    let snapshot = fx.guild.snapshot();
    let category = find_category_by_course_name("CS101", &snapshot).unwrap();
    assert_eq!(category.name, "CS101");
    assert_eq!(
        snapshot
            .channels
            .iter()
            .filter(|c| c.parent == Some(category.id))
            .count(),
        2
    );
    assert_eq!(fx.bridge.is_blocked("CS101"), Some(false));
}

#[tokio::test]
async fn repeated_create_converges_without_duplicates() {
    let fx = fixture();
    let (course, channels) = seed_course(&fx, 1, "CS101");

    fx.dispatcher
        .dispatch(ChangeEvent::CourseCreated {
            course: course.clone(),
            channels: channels.clone(),
        })
        .await
        .unwrap();
    fx.dispatcher
        .dispatch(ChangeEvent::CourseCreated { course, channels })
        .await
        .unwrap();

    assert_eq!(fx.log.count("role.create"), 2);
    assert_eq!(fx.log.count("category.create"), 1);
    assert_eq!(fx.log.count("channel.create"), 2);
}

#[tokio::test]
async fn destroy_removes_channels_then_category_then_roles() {
    let fx = fixture();
    let (course, channels) = seed_course(&fx, 1, "CS101");
    fx.dispatcher
        .dispatch(ChangeEvent::CourseCreated { course, channels })
        .await
        .unwrap();

    fx.store.remove_course(1);
    fx.dispatcher
        .dispatch(ChangeEvent::CourseDestroyed {
            name: "CS101".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(fx.log.count("channel.delete"), 2);
    assert_eq!(fx.log.count("category.delete"), 1);
    assert_eq!(fx.log.count("role.delete"), 2);

    let channel = fx.log.position("channel.delete").unwrap();
    let category = fx.log.position("category.delete").unwrap();
    let role = fx.log.position("role.delete").unwrap();
    assert!(channel < category);
    assert!(category < role);

    let snapshot = fx.guild.snapshot();
    assert!(snapshot.categories.is_empty());
    assert!(snapshot.channels.is_empty());
    // Only the seeded everyone role survives.
    assert_eq!(snapshot.roles.len(), 1);
    assert_eq!(fx.bridge.is_blocked("CS101"), None);
}

#[tokio::test]
async fn destroy_tolerates_absent_category_and_still_cleans_roles() {
    let fx = fixture();
    // The category is already gone; a stale student role lingers with
    // different casing.
    fx.guild.seed_role("cs101");

    fx.dispatcher
        .dispatch(ChangeEvent::CourseDestroyed {
            name: "CS101".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(fx.log.count("channel.delete"), 0);
    assert_eq!(fx.log.count("category.delete"), 0);
    assert_eq!(fx.log.count("role.delete"), 1);
}
