//! Renderer-facing types and the [`MapRenderer`] trait.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::cluster::ClusterOptions;
use crate::geo::Coordinates;
use crate::marker::{MarkerSpec, MarkerStyle};

/// Identifier of a map surface created by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// Identifier of a clustering layer created by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(pub u64);

/// Renderer handle of one drawn marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// The host element a surface is mounted into.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerId(pub String);

impl ContainerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Camera position of a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Coordinates,
    pub zoom: f64,
}

/// Tile source of the base layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayerSpec {
    /// URL template with `{z}`, `{x}`, `{y}` placeholders
    pub url: String,
    pub attribution: String,
}

/// Script direction of the surrounding UI.
///
/// Only overlay control placement depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Errors reported by a renderer backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// The container element is not attached to the document yet
    #[error("Container '{0}' is not attached")]
    ContainerDetached(ContainerId),

    #[error("Unknown surface {0:?}")]
    UnknownSurface(SurfaceId),

    #[error("Unknown layer {0:?}")]
    UnknownLayer(LayerId),

    #[error("Renderer error: {0}")]
    Backend(String),
}

/// Drawing primitives of the map-rendering collaborator.
///
/// The engine owns no rendering code; it only calls these. Calls on handles
/// the backend no longer knows about should be ignored by implementations.
pub trait MapRenderer: Send {
    /// Create a map surface inside a container.
    fn create_surface(
        &mut self,
        container: &ContainerId,
        viewport: Viewport,
    ) -> Result<SurfaceId, RenderError>;

    fn destroy_surface(&mut self, surface: SurfaceId);

    /// Replace the base tile layer in place.
    fn set_tile_layer(&mut self, surface: SurfaceId, tiles: &TileLayerSpec);

    /// Create a detached clustering layer.
    fn create_cluster_layer(&mut self, options: &ClusterOptions) -> LayerId;

    fn attach_layer(&mut self, surface: SurfaceId, layer: LayerId);

    fn detach_layer(&mut self, surface: SurfaceId, layer: LayerId);

    /// Destroy a layer and every marker it still holds.
    fn destroy_layer(&mut self, layer: LayerId);

    /// Draw a marker. Clicks on it are reported back with `marker.id`.
    fn add_marker(&mut self, layer: LayerId, marker: &MarkerSpec)
        -> Result<MarkerHandle, RenderError>;

    /// Move and/or re-style an existing marker without recreating it.
    fn update_marker(
        &mut self,
        layer: LayerId,
        handle: MarkerHandle,
        coordinates: Coordinates,
        style: &MarkerStyle,
    );

    fn remove_marker(&mut self, layer: LayerId, handle: MarkerHandle);

    /// Animate the camera. A new call supersedes one still in flight.
    fn fly_to(&mut self, surface: SurfaceId, target: Coordinates, zoom: f64, duration: Duration);

    /// Recompute the surface size after the container was resized.
    fn invalidate_size(&mut self, surface: SurfaceId);

    fn set_controls_direction(&mut self, surface: SurfaceId, direction: TextDirection);
}
