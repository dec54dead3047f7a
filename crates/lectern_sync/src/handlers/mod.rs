//! Lifecycle handlers, one per (entity, event) pair.
//!
//! Each handler composes locator and provisioner calls into a multi-step
//! remote mutation plan. Lookups that come up empty skip their step; remote
//! failures abort the remainder of the handler.

mod channel;
mod course;
mod user;

pub(crate) use channel::{channel_created, channel_destroyed, channel_renamed};
pub(crate) use course::{course_created, course_destroyed, course_updated};
pub(crate) use user::user_updated;
