//! The map engine facade.
//!
//! [`MapEngine`] owns every piece of map state: the surface lifecycle, the
//! per-mode cluster layers, the selection, the filters, the last snapshot
//! per mode and the user position. All mutation goes through `&mut self`;
//! the async [`driver`](crate::driver) serializes inputs onto it.
//!
//! A display pass runs in two steps. [`MapEngine::prepare_pass`] computes
//! the display set and stamps it with a new generation;
//! [`MapEngine::apply_pass`] reconciles the active layer with it. A pass
//! prepared before a newer one was applied is discarded. Selection changes
//! never run a pass: they re-style the two affected markers in place.

mod events;
mod facade;
mod view;


pub use events::{DataStatus, DiscardReason, MapEvent, PassResult};
pub use facade::MapEngine;
pub use view::EngineView;
