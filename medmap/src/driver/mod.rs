//! Async event loop around the engine.
//!
//! [`EngineDriver`] owns a [`MapEngine`](crate::engine::MapEngine) on one
//! task and feeds it three input streams:
//!
//! ```text
//! UI commands (mpsc) ─────────┐
//! active mode feed (watch) ───┼──► MapEngine ──► EngineView (watch)
//! geolocation results ────────┘
//! ```
//!
//! The feed is a watch channel, so a burst of snapshots collapses into the
//! latest one. Navigation drops the old subscription before subscribing to
//! the new mode.

mod command;
mod event_loop;

pub use command::EngineCommand;
pub use event_loop::{EngineDriver, DEFAULT_LOCATE_TIMEOUT};
