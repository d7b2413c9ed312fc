//! Boundary to the map-rendering collaborator.
//!
//! [`MapRenderer`] lists the primitives the engine needs: surfaces, tile
//! layers, clustering layers, markers and camera animation. Real backends
//! (a web map library, a native widget) implement it outside this crate;
//! [`RecordingRenderer`] is the in-memory implementation used by the CLI
//! and the tests.

mod recording;
mod types;

pub use recording::{RecordingRenderer, RenderCall};
pub use types::{
    ContainerId, LayerId, MapRenderer, MarkerHandle, RenderError, SurfaceId, TextDirection,
    TileLayerSpec, Viewport,
};
