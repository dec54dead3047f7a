//! Telegram bridge coordinator.
//!
//! The bridge relays course channel traffic to a secondary messaging
//! platform. Locking a course blocks its relay; the guild-side category
//! rename happens after, so external observers never see unlocked naming
//! while the bridge is still blocking. The coordinator never touches guild
//! state itself.

use async_trait::async_trait;
use lectern_error::{BridgeError, BridgeErrorKind, BridgeResult};
use lectern_guild::OpLog;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument};

/// Outcome of an idempotent bridge toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    /// The blocked flag flipped.
    Changed,
    /// The bridge was already in the requested state; repeated toggles
    /// collapse to the same external state.
    Unchanged,
}

/// Contract the bridge collaborator exposes to the reconciliation engine.
///
/// Keyed by course name. `set_blocked` is idempotent; toggling to the
/// current state reports [`BridgeState::Unchanged`] rather than failing, so
/// the command layer can phrase its response. An untracked course is a
/// precondition failure.
#[async_trait]
pub trait BridgeRelay: Send + Sync {
    /// Register a bridge channel for a course, unblocked.
    async fn track(&self, course: &str) -> BridgeResult<()>;

    /// Drop the bridge channel for a destroyed course.
    async fn forget(&self, course: &str) -> BridgeResult<()>;

    /// Set the blocked flag for a course's bridge channel.
    async fn set_blocked(&self, course: &str, blocked: bool) -> BridgeResult<BridgeState>;

    /// Rebuild the relay's course list after courses were added or removed.
    async fn refresh_courses(&self, courses: &[String]) -> BridgeResult<()>;
}

/// Block the bridge for a course. Invoked before the category name shows the
/// lock marker.
#[instrument(skip(relay))]
pub async fn lock_course(relay: &dyn BridgeRelay, course: &str) -> BridgeResult<BridgeState> {
    let state = relay.set_blocked(course, true).await?;
    match state {
        BridgeState::Changed => info!("Bridge locked"),
        BridgeState::Unchanged => debug!("Bridge already locked"),
    }
    Ok(state)
}

/// Resume the bridge for a course. Invoked before the lock marker is removed
/// from the category name.
#[instrument(skip(relay))]
pub async fn unlock_course(relay: &dyn BridgeRelay, course: &str) -> BridgeResult<BridgeState> {
    let state = relay.set_blocked(course, false).await?;
    match state {
        BridgeState::Changed => info!("Bridge unlocked"),
        BridgeState::Unchanged => debug!("Bridge already unlocked"),
    }
    Ok(state)
}

/// In-memory `BridgeRelay` recording into a shared operation log.
///
/// Sharing the log with a `MemoryGuild` makes cross-system ordering (bridge
/// toggle before category rename) observable in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryBridge {
    blocked: Arc<Mutex<HashMap<String, bool>>>,
    log: OpLog,
}

impl MemoryBridge {
    /// Create a relay with its own log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a relay recording into a caller-supplied log.
    pub fn with_log(log: OpLog) -> Self {
        Self {
            blocked: Arc::new(Mutex::new(HashMap::new())),
            log,
        }
    }

    /// Blocked flag for a course, if tracked.
    pub fn is_blocked(&self, course: &str) -> Option<bool> {
        self.blocked
            .lock()
            .expect("bridge state poisoned")
            .get(course)
            .copied()
    }
}

#[async_trait]
impl BridgeRelay for MemoryBridge {
    async fn track(&self, course: &str) -> BridgeResult<()> {
        self.blocked
            .lock()
            .expect("bridge state poisoned")
            .entry(course.to_string())
            .or_insert(false);
        self.log.record(format!("bridge.track {course}"));
        Ok(())
    }

    async fn forget(&self, course: &str) -> BridgeResult<()> {
        self.blocked
            .lock()
            .expect("bridge state poisoned")
            .remove(course);
        self.log.record(format!("bridge.forget {course}"));
        Ok(())
    }

    async fn set_blocked(&self, course: &str, blocked: bool) -> BridgeResult<BridgeState> {
        let mut state = self.blocked.lock().expect("bridge state poisoned");
        let flag = state.get_mut(course).ok_or_else(|| {
            BridgeError::new(BridgeErrorKind::UnknownCourse(course.to_string()))
        })?;
        if *flag == blocked {
            return Ok(BridgeState::Unchanged);
        }
        *flag = blocked;
        let verb = if blocked { "lock" } else { "unlock" };
        self.log.record(format!("bridge.{verb} {course}"));
        Ok(BridgeState::Changed)
    }

    async fn refresh_courses(&self, courses: &[String]) -> BridgeResult<()> {
        self.log
            .record(format!("bridge.courses {}", courses.len()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn double_lock_collapses_to_unchanged() {
        let bridge = MemoryBridge::new();
        bridge.track("CS101").await.unwrap();

        assert_eq!(lock_course(&bridge, "CS101").await.unwrap(), BridgeState::Changed);
        assert_eq!(lock_course(&bridge, "CS101").await.unwrap(), BridgeState::Unchanged);
        assert_eq!(bridge.is_blocked("CS101"), Some(true));
    }

    #[tokio::test]
    async fn untracked_course_is_a_precondition_failure() {
        let bridge = MemoryBridge::new();
        let err = lock_course(&bridge, "CS999").await.unwrap_err();
        assert!(matches!(err.kind(), BridgeErrorKind::UnknownCourse(_)));
    }

    #[tokio::test]
    async fn unlock_reverses_lock() {
        let bridge = MemoryBridge::new();
        bridge.track("CS101").await.unwrap();
        lock_course(&bridge, "CS101").await.unwrap();

        assert_eq!(unlock_course(&bridge, "CS101").await.unwrap(), BridgeState::Changed);
        assert_eq!(bridge.is_blocked("CS101"), Some(false));
        assert_eq!(unlock_course(&bridge, "CS101").await.unwrap(), BridgeState::Unchanged);
    }
}
