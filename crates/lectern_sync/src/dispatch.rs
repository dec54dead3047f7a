//! Event dispatch.
//!
//! The dispatcher is the subscription point the persistence layer drives:
//! one settled mutation, one `ChangeEvent`, one handler invocation,
//! synchronous relative to the mutation. Handlers receive their
//! capabilities through an explicit [`SyncContext`] rather than ambient
//! state.

use crate::{BridgeRelay, RecordStore, handlers};
use lectern_core::{ChangeEvent, GuildNames};
use lectern_error::SyncResult;
use lectern_guild::GuildHost;
use std::sync::Arc;
use tracing::instrument;

/// Capability bundle for one handler invocation: the live guild handle, the
/// bridge relay, the read-only record store, and naming configuration.
#[derive(Clone)]
pub struct SyncContext {
    /// Live guild capability handle.
    pub guild: Arc<dyn GuildHost>,
    /// Bridge relay collaborator.
    pub bridge: Arc<dyn BridgeRelay>,
    /// Read-only record store.
    pub store: Arc<dyn RecordStore>,
    /// Role and channel naming configuration.
    pub names: GuildNames,
}

impl SyncContext {
    /// Bundle the collaborators a handler needs.
    pub fn new(
        guild: Arc<dyn GuildHost>,
        bridge: Arc<dyn BridgeRelay>,
        store: Arc<dyn RecordStore>,
        names: GuildNames,
    ) -> Self {
        Self {
            guild,
            bridge,
            store,
            names,
        }
    }
}

/// Routes change events to lifecycle handlers.
///
/// The typed event enum replaces dynamic hook registration: the registry is
/// the exhaustive match below, so adding an event without a handler fails to
/// compile.
pub struct Dispatcher {
    ctx: SyncContext,
}

impl Dispatcher {
    /// Create a dispatcher over a capability context.
    pub fn new(ctx: SyncContext) -> Self {
        Self { ctx }
    }

    /// The context handlers are invoked with.
    pub fn context(&self) -> &SyncContext {
        &self.ctx
    }

    /// Invoke the handler for one settled mutation.
    ///
    /// Runs to completion or fails; a failure aborts the remainder of that
    /// handler only, leaving the projection to converge on a later event.
    #[instrument(skip(self, event), fields(event = %event.kind()))]
    pub async fn dispatch(&self, event: ChangeEvent) -> SyncResult<()> {
        match event {
            ChangeEvent::CourseCreated { course, channels } => {
                handlers::course_created(&self.ctx, &course, &channels).await
            }
            ChangeEvent::CourseUpdated { course, changes } => {
                handlers::course_updated(&self.ctx, &course, &changes).await
            }
            ChangeEvent::CourseDestroyed { name } => {
                handlers::course_destroyed(&self.ctx, &name).await
            }
            ChangeEvent::ChannelCreated { channel } => {
                handlers::channel_created(&self.ctx, &channel).await
            }
            ChangeEvent::ChannelRenamed {
                channel,
                previous_name,
            } => handlers::channel_renamed(&self.ctx, &channel, &previous_name).await,
            ChangeEvent::ChannelDestroyed { name } => {
                handlers::channel_destroyed(&self.ctx, &name).await
            }
            ChangeEvent::UserUpdated { user, changes } => {
                handlers::user_updated(&self.ctx, &user, &changes).await
            }
        }
    }
}
