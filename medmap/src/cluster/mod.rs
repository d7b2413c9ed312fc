//! Clustering layers, one per map mode.
//!
//! Each mode draws its markers on its own clustering layer with its own
//! live-marker index. Only the active mode's layer is attached to the
//! surface; switching modes tears the old layer down before the new one is
//! attached.

mod layer;
mod options;
mod registry;

pub use layer::{ClusterLayer, LayerHandle};
pub use options::{ClusterOptions, MAX_RADIUS_PX, MIN_RADIUS_PX};
pub use registry::LayerRegistry;
