//! Instructor promotion and invite refresh.

mod common;

use common::{fixture, seed_course};
use lectern_core::{ChangeEvent, CourseMemberRecord, CourseRecord, UserRecord};
use lectern_guild::GuildHost;
use lectern_sync::{promote_instructor, refresh_invites};

#[tokio::test]
async fn promotion_requires_course_membership() {
    let fx = fixture();
    let (course, channels) = seed_course(&fx, 1, "CS101");
    fx.dispatcher
        .dispatch(ChangeEvent::CourseCreated { course, channels })
        .await
        .unwrap();

    let outsider = UserRecord::new(7, "7007", false, false);
    let course = CourseRecord::new(1, "CS101", false, false);
    let err = promote_instructor(fx.dispatcher.context(), &outsider, &course)
        .await
        .unwrap_err();
    assert!(err.is_precondition());
    assert!(fx.guild.member_roles("7007").is_empty());
}

#[tokio::test]
async fn promotion_grants_the_instructor_role() {
    let fx = fixture();
    let (course, channels) = seed_course(&fx, 1, "CS101");
    fx.dispatcher
        .dispatch(ChangeEvent::CourseCreated { course, channels })
        .await
        .unwrap();

    let member = UserRecord::new(7, "7007", false, false);
    fx.store.put_member(CourseMemberRecord::new(7, 1, false));
    let course = CourseRecord::new(1, "CS101", false, false);
    promote_instructor(fx.dispatcher.context(), &member, &course)
        .await
        .unwrap();

    let snapshot = fx.guild.snapshot();
    let instructor = lectern_guild::find_role_by_name("CS101 Instructor", &snapshot).unwrap();
    assert!(fx.guild.member_roles("7007").contains(&instructor.id));
}

#[tokio::test]
async fn invite_refresh_covers_every_announcement_channel() {
    let fx = fixture();
    for (id, name) in [(1, "CS101"), (2, "CS102")] {
        let (course, channels) = seed_course(&fx, id, name);
        fx.dispatcher
            .dispatch(ChangeEvent::CourseCreated { course, channels })
            .await
            .unwrap();
    }
    let before = fx.guild.invites().len();

    refresh_invites(fx.dispatcher.context()).await.unwrap();

    assert_eq!(fx.guild.invites().len(), before + 2);
}
