//! One cluster layer per map mode, created on demand.

use std::collections::HashMap;
use std::sync::Arc;

use super::layer::{ClusterLayer, LayerHandle};
use super::options::ClusterOptions;
use crate::log::{Logger, NoOpLogger};
use crate::mode::MapMode;
use crate::render::MapRenderer;
use crate::surface::MapLifecycle;
use crate::log_debug;

/// Clustering layers keyed by mode, at most one per mode.
pub struct LayerRegistry {
    options: ClusterOptions,
    layers: HashMap<MapMode, ClusterLayer>,
    active: Option<MapMode>,
    logger: Arc<dyn Logger>,
}

impl LayerRegistry {
    pub fn new(options: ClusterOptions) -> Self {
        Self {
            options,
            layers: HashMap::new(),
            active: None,
            logger: Arc::new(NoOpLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn options(&self) -> &ClusterOptions {
        &self.options
    }

    /// The mode whose layer is attached to the surface.
    pub fn active(&self) -> Option<MapMode> {
        self.active
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn handle(&self, mode: MapMode) -> Option<LayerHandle> {
        self.layers.get(&mode).map(ClusterLayer::handle)
    }

    pub fn layer(&self, mode: MapMode) -> Option<&ClusterLayer> {
        self.layers.get(&mode)
    }

    pub fn layer_mut(&mut self, mode: MapMode) -> Option<&mut ClusterLayer> {
        self.layers.get_mut(&mode)
    }

    /// Create the clustering layer for `mode`.
    ///
    /// Idempotent: a second call returns the existing handle and creates
    /// nothing. The layer is not attached.
    pub fn register_layer<R: MapRenderer>(
        &mut self,
        mode: MapMode,
        map: &mut MapLifecycle<R>,
    ) -> LayerHandle {
        if let Some(existing) = self.layers.get(&mode) {
            return existing.handle();
        }
        let layer = map.renderer_mut().create_cluster_layer(&self.options);
        let handle = LayerHandle { mode, layer };
        self.layers
            .insert(mode, ClusterLayer::new(handle, self.logger.clone()));
        log_debug!(self.logger, "registered cluster layer {:?} for {}", layer, mode);
        handle
    }

    /// Detach and destroy the layer of `mode` with all its markers.
    pub fn remove_layer<R: MapRenderer>(&mut self, mode: MapMode, map: &mut MapLifecycle<R>) -> bool {
        let Some(mut layer) = self.layers.remove(&mode) else {
            return false;
        };
        let layer_id = layer.handle().layer;
        map.detach_layer(layer_id);
        layer.clear(map.renderer_mut());
        map.renderer_mut().destroy_layer(layer_id);
        if self.active == Some(mode) {
            self.active = None;
        }
        log_debug!(self.logger, "removed cluster layer {:?} for {}", layer_id, mode);
        true
    }

    /// Make `to` the attached mode.
    ///
    /// The previous mode's layer is removed before the new one is attached,
    /// so two modes never share the surface. The surface itself and the
    /// camera are left alone.
    pub fn switch_mode<R: MapRenderer>(
        &mut self,
        to: MapMode,
        map: &mut MapLifecycle<R>,
    ) -> LayerHandle {
        if let Some(from) = self.active {
            if from != to {
                self.remove_layer(from, map);
            }
        }
        let handle = self.register_layer(to, map);
        map.attach_layer(handle.layer);
        self.active = Some(to);
        handle
    }

    /// Remove every layer.
    pub fn clear<R: MapRenderer>(&mut self, map: &mut MapLifecycle<R>) {
        let mut modes: Vec<MapMode> = self.layers.keys().copied().collect();
        modes.sort_by_key(|m| m.as_str());
        for mode in modes {
            self.remove_layer(mode, map);
        }
        self.active = None;
    }
}

impl std::fmt::Debug for LayerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerRegistry")
            .field("options", &self.options)
            .field("active", &self.active)
            .field("layers", &self.layers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{ContainerId, RecordingRenderer, RenderCall};
    use crate::surface::SurfaceOptions;

    fn ready_map() -> MapLifecycle<RecordingRenderer> {
        let mut map = MapLifecycle::new(RecordingRenderer::new(), SurfaceOptions::default());
        map.mount(ContainerId::new("map"));
        map
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut map = ready_map();
        let mut registry = LayerRegistry::new(ClusterOptions::default());

        let first = registry.register_layer(MapMode::Emergency, &mut map);
        let second = registry.register_layer(MapMode::Emergency, &mut map);
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
        let created = map
            .renderer()
            .count(|c| matches!(c, RenderCall::CreateClusterLayer(_)));
        assert_eq!(created, 1);
    }

    #[test]
    fn test_switch_mode_detaches_before_attaching() {
        let mut map = ready_map();
        let surface = map.surface().unwrap();
        let mut registry = LayerRegistry::new(ClusterOptions::default());

        let providers = registry.switch_mode(MapMode::Providers, &mut map);
        map.renderer_mut().clear_calls();
        let blood = registry.switch_mode(MapMode::Blood, &mut map);

        let calls = map.renderer().calls();
        let detach = calls
            .iter()
            .position(|c| *c == RenderCall::DetachLayer { surface, layer: providers.layer })
            .unwrap();
        let attach = calls
            .iter()
            .position(|c| *c == RenderCall::AttachLayer { surface, layer: blood.layer })
            .unwrap();
        assert!(detach < attach);

        assert_eq!(map.renderer().attached_layers(surface), vec![blood.layer]);
        assert_eq!(registry.active(), Some(MapMode::Blood));
        assert!(registry.handle(MapMode::Providers).is_none());
        assert_eq!(map.renderer().surface_count(), 1);
    }

    #[test]
    fn test_switch_to_same_mode_is_stable() {
        let mut map = ready_map();
        let mut registry = LayerRegistry::new(ClusterOptions::default());
        let a = registry.switch_mode(MapMode::Providers, &mut map);
        let b = registry.switch_mode(MapMode::Providers, &mut map);
        assert_eq!(a, b);
        assert_eq!(map.attached_layers(), &[a.layer]);
    }

    #[test]
    fn test_remove_unknown_layer() {
        let mut map = ready_map();
        let mut registry = LayerRegistry::new(ClusterOptions::default());
        assert!(!registry.remove_layer(MapMode::Blood, &mut map));
    }
}
