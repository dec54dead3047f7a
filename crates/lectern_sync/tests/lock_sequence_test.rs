//! Lock/unlock and visibility sequencing.

mod common;

use common::{fixture, seed_course};
use lectern_core::{ChangeEvent, CourseChanges, CourseRecord};
use lectern_guild::{find_category_by_course_name, GuildHost};

#[tokio::test]
async fn locking_blocks_bridge_before_showing_the_marker() {
    let fx = fixture();
    let (course, channels) = seed_course(&fx, 1, "CS101");
    fx.dispatcher
        .dispatch(ChangeEvent::CourseCreated { course, channels })
        .await
        .unwrap();

    let locked = CourseRecord::new(1, "CS101", true, false);
    fx.store.put_course(locked.clone());
    fx.dispatcher
        .dispatch(ChangeEvent::CourseUpdated {
            course: locked,
            changes: CourseChanges::lock_toggled(false),
        })
        .await
        .unwrap();

    assert_eq!(fx.bridge.is_blocked("CS101"), Some(true));
    let snapshot = fx.guild.snapshot();
    let category = find_category_by_course_name("CS101", &snapshot).unwrap();
    assert_eq!(category.name, "🔒 CS101");

    let bridge = fx.log.position("bridge.lock CS101").unwrap();
    let rename = fx.log.position("category.rename CS101 ->").unwrap();
    assert!(bridge < rename, "bridge must block before the marker shows");
}

#[tokio::test]
async fn unlocking_resumes_bridge_before_dropping_the_marker() {
    let fx = fixture();
    let (course, channels) = seed_course(&fx, 1, "CS101");
    fx.dispatcher
        .dispatch(ChangeEvent::CourseCreated { course, channels })
        .await
        .unwrap();

    let locked = CourseRecord::new(1, "CS101", true, false);
    fx.store.put_course(locked.clone());
    fx.dispatcher
        .dispatch(ChangeEvent::CourseUpdated {
            course: locked,
            changes: CourseChanges::lock_toggled(false),
        })
        .await
        .unwrap();

    let unlocked = CourseRecord::new(1, "CS101", false, false);
    fx.store.put_course(unlocked.clone());
    fx.dispatcher
        .dispatch(ChangeEvent::CourseUpdated {
            course: unlocked,
            changes: CourseChanges::lock_toggled(true),
        })
        .await
        .unwrap();

    assert_eq!(fx.bridge.is_blocked("CS101"), Some(false));
    let snapshot = fx.guild.snapshot();
    let category = find_category_by_course_name("CS101", &snapshot).unwrap();
    assert_eq!(category.name, "CS101");

    let bridge = fx.log.position("bridge.unlock CS101").unwrap();
    let rename = fx.log.position("category.rename 🔒 CS101 ->").unwrap();
    assert!(bridge < rename, "bridge must resume before the marker drops");
}

#[tokio::test]
async fn hiding_recodes_the_name_without_touching_the_bridge() {
    let fx = fixture();
    let (course, channels) = seed_course(&fx, 1, "CS101");
    fx.dispatcher
        .dispatch(ChangeEvent::CourseCreated { course, channels })
        .await
        .unwrap();

    let hidden = CourseRecord::new(1, "CS101", false, true);
    fx.store.put_course(hidden.clone());
    fx.dispatcher
        .dispatch(ChangeEvent::CourseUpdated {
            course: hidden,
            changes: CourseChanges::visibility_toggled(false),
        })
        .await
        .unwrap();

    let snapshot = fx.guild.snapshot();
    let category = find_category_by_course_name("CS101", &snapshot).unwrap();
    assert_eq!(category.name, "🙈 CS101");
    assert_eq!(fx.bridge.is_blocked("CS101"), Some(false));
    assert_eq!(fx.log.count("bridge.lock"), 0);
}
