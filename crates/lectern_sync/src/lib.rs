//! Reconciliation engine for Lectern.
//!
//! The relational store is the single source of truth; the remote guild is a
//! derived, best-effort projection. After each settled mutation the store
//! emits a typed [`ChangeEvent`](lectern_core::ChangeEvent); the
//! [`Dispatcher`] routes it to the matching lifecycle handler, which reads
//! current remote state through the guild snapshot, computes the required
//! operations, and executes them through the idempotent provisioner.
//!
//! Convergence is eventual, per event: a handler runs to completion or fails
//! partway, and a failed handler leaves the projection partially updated
//! until the next event or a manual retrigger. Remote calls are the only
//! suspension points; there is no cross-handler locking.
//!
//! # Architecture
//!
//! - **dispatch**: the typed event registry and the `SyncContext` capability
//!   bundle handlers receive
//! - **handlers**: one handler per (entity, event) pair
//! - **bridge**: the Telegram bridge coordinator and its relay contract
//! - **guide**: the derived guide document, fully rewritten after every
//!   structural course change
//! - **store**: the read-only record store contract the handlers consume
//! - **roster**: instructor promotion support used by the command layer

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bridge;
mod dispatch;
mod guide;
mod handlers;
mod roster;
mod store;

pub use bridge::{BridgeRelay, BridgeState, MemoryBridge, lock_course, unlock_course};
pub use dispatch::{Dispatcher, SyncContext};
pub use guide::render_guide;
pub use roster::{promote_instructor, refresh_invites};
pub use store::{MemoryStore, RecordStore};
