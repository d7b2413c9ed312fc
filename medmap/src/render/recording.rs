//! In-memory renderer that records every call.
//!
//! Backs the headless CLI and the tests: it keeps enough state (surfaces,
//! attached layers, markers per layer) to check what a real map would show.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::time::Duration;

use super::types::{
    ContainerId, LayerId, MapRenderer, MarkerHandle, RenderError, SurfaceId, TextDirection,
    TileLayerSpec, Viewport,
};
use crate::cluster::ClusterOptions;
use crate::geo::Coordinates;
use crate::marker::{MarkerSpec, MarkerStyle};

/// One recorded renderer call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    CreateSurface(ContainerId),
    DestroySurface(SurfaceId),
    SetTileLayer { surface: SurfaceId, url: String },
    CreateClusterLayer(LayerId),
    AttachLayer { surface: SurfaceId, layer: LayerId },
    DetachLayer { surface: SurfaceId, layer: LayerId },
    DestroyLayer(LayerId),
    AddMarker { layer: LayerId, id: String },
    UpdateMarker { layer: LayerId, id: String, style: MarkerStyle },
    RemoveMarker { layer: LayerId, id: String },
    FlyTo { surface: SurfaceId, target: Coordinates, zoom: f64 },
    InvalidateSize(SurfaceId),
    SetControlsDirection { surface: SurfaceId, direction: TextDirection },
}

#[derive(Debug, Clone)]
struct DrawnMarker {
    id: String,
    coordinates: Coordinates,
    style: MarkerStyle,
}

#[derive(Debug, Default)]
struct SurfaceRecord {
    tiles: Option<TileLayerSpec>,
    layers: Vec<LayerId>,
    viewport: Option<Viewport>,
}

/// A [`MapRenderer`] that draws nothing and remembers everything.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    next_id: u64,
    calls: Vec<RenderCall>,
    detached_containers: HashSet<ContainerId>,
    surfaces: HashMap<SurfaceId, SurfaceRecord>,
    layers: HashMap<LayerId, BTreeMap<u64, DrawnMarker>>,
    rejected_ids: HashSet<String>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a container that is (not) attached to the document.
    pub fn set_container_attached(&mut self, container: &ContainerId, attached: bool) {
        if attached {
            self.detached_containers.remove(container);
        } else {
            self.detached_containers.insert(container.clone());
        }
    }

    /// Make `add_marker` fail for an entity id.
    pub fn reject_marker(&mut self, id: impl Into<String>) {
        self.rejected_ids.insert(id.into());
    }

    /// Every call since creation or the last [`clear_calls`](Self::clear_calls).
    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of recorded calls matching a predicate.
    pub fn count(&self, predicate: impl Fn(&RenderCall) -> bool) -> usize {
        self.calls.iter().filter(|c| predicate(c)).count()
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    /// Layers currently attached to a surface, in attach order.
    pub fn attached_layers(&self, surface: SurfaceId) -> Vec<LayerId> {
        self.surfaces
            .get(&surface)
            .map(|s| s.layers.clone())
            .unwrap_or_default()
    }

    /// Current tile URL of a surface.
    pub fn tile_url(&self, surface: SurfaceId) -> Option<&str> {
        self.surfaces
            .get(&surface)
            .and_then(|s| s.tiles.as_ref())
            .map(|t| t.url.as_str())
    }

    /// Last camera target of a surface.
    pub fn viewport(&self, surface: SurfaceId) -> Option<Viewport> {
        self.surfaces.get(&surface).and_then(|s| s.viewport)
    }

    /// Entity ids drawn on a layer, sorted.
    pub fn marker_ids(&self, layer: LayerId) -> Vec<String> {
        let mut ids: Vec<String> = self
            .layers
            .get(&layer)
            .map(|m| m.values().map(|d| d.id.clone()).collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }

    /// Current style of a drawn marker.
    pub fn marker_style(&self, layer: LayerId, id: &str) -> Option<MarkerStyle> {
        self.find_marker(layer, id).map(|d| d.style)
    }

    /// Current position of a drawn marker.
    pub fn marker_position(&self, layer: LayerId, id: &str) -> Option<Coordinates> {
        self.find_marker(layer, id).map(|d| d.coordinates)
    }

    /// Renderer handle of a drawn marker.
    pub fn marker_handle(&self, layer: LayerId, id: &str) -> Option<MarkerHandle> {
        self.layers.get(&layer).and_then(|markers| {
            markers
                .iter()
                .find(|(_, d)| d.id == id)
                .map(|(h, _)| MarkerHandle(*h))
        })
    }

    fn find_marker(&self, layer: LayerId, id: &str) -> Option<&DrawnMarker> {
        self.layers
            .get(&layer)
            .and_then(|markers| markers.values().find(|d| d.id == id))
    }

    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn marker_id(&self, layer: LayerId, handle: MarkerHandle) -> String {
        self.layers
            .get(&layer)
            .and_then(|m| m.get(&handle.0))
            .map(|d| d.id.clone())
            .unwrap_or_default()
    }
}

impl MapRenderer for RecordingRenderer {
    fn create_surface(
        &mut self,
        container: &ContainerId,
        viewport: Viewport,
    ) -> Result<SurfaceId, RenderError> {
        if self.detached_containers.contains(container) {
            return Err(RenderError::ContainerDetached(container.clone()));
        }
        let id = SurfaceId(self.allocate());
        self.calls.push(RenderCall::CreateSurface(container.clone()));
        self.surfaces.insert(
            id,
            SurfaceRecord {
                viewport: Some(viewport),
                ..SurfaceRecord::default()
            },
        );
        Ok(id)
    }

    fn destroy_surface(&mut self, surface: SurfaceId) {
        self.calls.push(RenderCall::DestroySurface(surface));
        self.surfaces.remove(&surface);
    }

    fn set_tile_layer(&mut self, surface: SurfaceId, tiles: &TileLayerSpec) {
        self.calls.push(RenderCall::SetTileLayer {
            surface,
            url: tiles.url.clone(),
        });
        if let Some(record) = self.surfaces.get_mut(&surface) {
            record.tiles = Some(tiles.clone());
        }
    }

    fn create_cluster_layer(&mut self, _options: &ClusterOptions) -> LayerId {
        let id = LayerId(self.allocate());
        self.calls.push(RenderCall::CreateClusterLayer(id));
        self.layers.insert(id, BTreeMap::new());
        id
    }

    fn attach_layer(&mut self, surface: SurfaceId, layer: LayerId) {
        self.calls.push(RenderCall::AttachLayer { surface, layer });
        if let Some(record) = self.surfaces.get_mut(&surface) {
            if !record.layers.contains(&layer) {
                record.layers.push(layer);
            }
        }
    }

    fn detach_layer(&mut self, surface: SurfaceId, layer: LayerId) {
        self.calls.push(RenderCall::DetachLayer { surface, layer });
        if let Some(record) = self.surfaces.get_mut(&surface) {
            record.layers.retain(|l| *l != layer);
        }
    }

    fn destroy_layer(&mut self, layer: LayerId) {
        self.calls.push(RenderCall::DestroyLayer(layer));
        self.layers.remove(&layer);
        for record in self.surfaces.values_mut() {
            record.layers.retain(|l| *l != layer);
        }
    }

    fn add_marker(
        &mut self,
        layer: LayerId,
        marker: &MarkerSpec,
    ) -> Result<MarkerHandle, RenderError> {
        if self.rejected_ids.contains(&marker.id) {
            return Err(RenderError::Backend(format!("marker '{}' rejected", marker.id)));
        }
        if !self.layers.contains_key(&layer) {
            return Err(RenderError::UnknownLayer(layer));
        }
        let handle = self.allocate();
        self.calls.push(RenderCall::AddMarker {
            layer,
            id: marker.id.clone(),
        });
        if let Some(markers) = self.layers.get_mut(&layer) {
            markers.insert(
                handle,
                DrawnMarker {
                    id: marker.id.clone(),
                    coordinates: marker.coordinates,
                    style: marker.style,
                },
            );
        }
        Ok(MarkerHandle(handle))
    }

    fn update_marker(
        &mut self,
        layer: LayerId,
        handle: MarkerHandle,
        coordinates: Coordinates,
        style: &MarkerStyle,
    ) {
        let id = self.marker_id(layer, handle);
        self.calls.push(RenderCall::UpdateMarker {
            layer,
            id,
            style: *style,
        });
        if let Some(drawn) = self.layers.get_mut(&layer).and_then(|m| m.get_mut(&handle.0)) {
            drawn.coordinates = coordinates;
            drawn.style = *style;
        }
    }

    fn remove_marker(&mut self, layer: LayerId, handle: MarkerHandle) {
        let id = self.marker_id(layer, handle);
        self.calls.push(RenderCall::RemoveMarker { layer, id });
        if let Some(markers) = self.layers.get_mut(&layer) {
            markers.remove(&handle.0);
        }
    }

    fn fly_to(&mut self, surface: SurfaceId, target: Coordinates, zoom: f64, _duration: Duration) {
        self.calls.push(RenderCall::FlyTo {
            surface,
            target,
            zoom,
        });
        if let Some(record) = self.surfaces.get_mut(&surface) {
            record.viewport = Some(Viewport {
                center: target,
                zoom,
            });
        }
    }

    fn invalidate_size(&mut self, surface: SurfaceId) {
        self.calls.push(RenderCall::InvalidateSize(surface));
    }

    fn set_controls_direction(&mut self, surface: SurfaceId, direction: TextDirection) {
        self.calls
            .push(RenderCall::SetControlsDirection { surface, direction });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::{marker_style, StyleInputs};
    use crate::mode::MapMode;
    use crate::provider::ProviderType;

    fn viewport() -> Viewport {
        Viewport {
            center: Coordinates::new(35.0, -0.6),
            zoom: 13.0,
        }
    }

    fn spec(id: &str) -> MarkerSpec {
        MarkerSpec {
            id: id.to_string(),
            title: id.to_string(),
            coordinates: Coordinates::new(35.0, -0.6),
            style: marker_style(
                MapMode::Providers,
                StyleInputs {
                    provider_type: ProviderType::Clinic,
                    is_selected: false,
                    is_emergency_capable: false,
                },
            ),
        }
    }

    #[test]
    fn test_detached_container_fails() {
        let mut renderer = RecordingRenderer::new();
        let container = ContainerId::new("map");
        renderer.set_container_attached(&container, false);
        assert_eq!(
            renderer.create_surface(&container, viewport()),
            Err(RenderError::ContainerDetached(container.clone()))
        );
        renderer.set_container_attached(&container, true);
        assert!(renderer.create_surface(&container, viewport()).is_ok());
    }

    #[test]
    fn test_markers_tracked_per_layer() {
        let mut renderer = RecordingRenderer::new();
        let layer = renderer.create_cluster_layer(&ClusterOptions::default());
        let a = renderer.add_marker(layer, &spec("a")).unwrap();
        renderer.add_marker(layer, &spec("b")).unwrap();
        assert_eq!(renderer.marker_ids(layer), vec!["a", "b"]);

        renderer.remove_marker(layer, a);
        assert_eq!(renderer.marker_ids(layer), vec!["b"]);
        assert_eq!(
            renderer.calls().last(),
            Some(&RenderCall::RemoveMarker {
                layer,
                id: "a".to_string()
            })
        );
    }

    #[test]
    fn test_destroy_layer_detaches_it() {
        let mut renderer = RecordingRenderer::new();
        let surface = renderer
            .create_surface(&ContainerId::new("map"), viewport())
            .unwrap();
        let layer = renderer.create_cluster_layer(&ClusterOptions::default());
        renderer.attach_layer(surface, layer);
        renderer.attach_layer(surface, layer);
        assert_eq!(renderer.attached_layers(surface), vec![layer]);

        renderer.destroy_layer(layer);
        assert!(renderer.attached_layers(surface).is_empty());
    }

    #[test]
    fn test_rejected_marker() {
        let mut renderer = RecordingRenderer::new();
        let layer = renderer.create_cluster_layer(&ClusterOptions::default());
        renderer.reject_marker("bad");
        assert!(renderer.add_marker(layer, &spec("bad")).is_err());
        assert!(renderer.marker_ids(layer).is_empty());
    }
}
