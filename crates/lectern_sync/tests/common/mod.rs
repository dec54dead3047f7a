//! Shared fixtures for handler integration tests.
//!
//! The guild and bridge doubles share one operation log so cross-system
//! ordering (bridge toggle vs. category rename) is observable.

use lectern_core::{ChannelRecord, CourseRecord, GuildNames, naming};
use lectern_sync::{Dispatcher, MemoryBridge, MemoryStore, SyncContext};
use lectern_guild::{MemoryGuild, OpLog};
use std::sync::Arc;

pub struct Fixture {
    pub dispatcher: Dispatcher,
    pub guild: MemoryGuild,
    pub bridge: MemoryBridge,
    pub store: Arc<MemoryStore>,
    pub log: OpLog,
}

pub fn fixture() -> Fixture {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let log = OpLog::new();
    let guild = MemoryGuild::with_log(log.clone());
    let bridge = MemoryBridge::with_log(log.clone());
    let store = Arc::new(MemoryStore::new());
    let ctx = SyncContext::new(
        Arc::new(guild.clone()),
        Arc::new(bridge.clone()),
        store.clone(),
        GuildNames::default(),
    );
    Fixture {
        dispatcher: Dispatcher::new(ctx),
        guild,
        bridge,
        store,
        log,
    }
}

/// A course row plus its two default channel rows, inserted into the store.
pub fn seed_course(fixture: &Fixture, id: i64, name: &str) -> (CourseRecord, Vec<ChannelRecord>) {
    let course = CourseRecord::new(id, name, false, false);
    let channels = vec![
        ChannelRecord::new(
            id * 10,
            id,
            naming::course_channel_name(name, "announcement"),
            true,
        ),
        ChannelRecord::new(
            id * 10 + 1,
            id,
            naming::course_channel_name(name, "general"),
            true,
        ),
    ];
    fixture.store.put_course(course.clone());
    for channel in &channels {
        fixture.store.put_channel(channel.clone());
    }
    (course, channels)
}
