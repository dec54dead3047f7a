//! Idempotency tests for the find-or-create primitives.

use lectern_guild::{
    CategorySpec, ChannelSpec, GuildHost, MemoryGuild, find_or_create_category,
    find_or_create_channel, find_or_create_role,
};

#[tokio::test]
async fn channel_find_or_create_returns_same_identity() {
    let guild = MemoryGuild::new();
    let spec = ChannelSpec::builder("CS101_general").build().unwrap();

    let first = find_or_create_channel(&guild, &spec).await.unwrap();
    let second = find_or_create_channel(&guild, &spec).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(guild.log().count("channel.create"), 1);
}

#[tokio::test]
async fn category_find_or_create_matches_through_markers() {
    let guild = MemoryGuild::new();

    let first = find_or_create_category(&guild, &CategorySpec::new("CS101", vec![]))
        .await
        .unwrap();
    // A lock toggle renamed the category; the logical identity is unchanged.
    guild.rename_category(first.id, "🔒 CS101").await.unwrap();

    let second = find_or_create_category(&guild, &CategorySpec::new("CS101", vec![]))
        .await
        .unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(guild.log().count("category.create"), 1);
}

#[tokio::test]
async fn role_find_or_create_never_duplicates() {
    let guild = MemoryGuild::new();

    let first = find_or_create_role(&guild, "CS101 Instructor").await.unwrap();
    let second = find_or_create_role(&guild, "CS101 Instructor").await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(guild.log().count("role.create"), 1);
}
