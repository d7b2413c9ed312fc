//! The engine facade tying feed data to markers on the map.

use std::collections::HashMap;
use std::sync::Arc;

use super::events::{DataStatus, DiscardReason, MapEvent, PassResult};
use super::view::EngineView;
use crate::cluster::{LayerHandle, LayerRegistry};
use crate::config::EngineConfig;
use crate::filter::{compute_display_set, FilterSet};
use crate::geo::Coordinates;
use crate::geolocation::{GeolocationError, GeolocationState};
use crate::log::{Logger, TracingLogger};
use crate::marker::{DisplayPass, PassOutcome, SkippedEntity};
use crate::mode::MapMode;
use crate::provider::{DisplayEntity, ProviderSnapshot};
use crate::render::{ContainerId, MapRenderer, TextDirection, Viewport};
use crate::selection::{SelectionChange, SelectionController, SelectionState};
use crate::surface::{MapLifecycle, MapTheme, MountOutcome};
use crate::{log_debug, log_info, log_warn};

/// Interactive provider map over a [`MapRenderer`].
pub struct MapEngine<R: MapRenderer> {
    config: EngineConfig,
    map: MapLifecycle<R>,
    layers: LayerRegistry,
    selection: SelectionController,
    filters: FilterSet,
    snapshots: HashMap<MapMode, ProviderSnapshot>,
    status: HashMap<MapMode, DataStatus>,
    geolocation: GeolocationState,
    display: Vec<DisplayEntity>,
    display_generation: u64,
    next_generation: u64,
    skipped: Vec<SkippedEntity>,
    viewport: Option<Viewport>,
    logger: Arc<dyn Logger>,
}

impl<R: MapRenderer> MapEngine<R> {
    pub fn new(renderer: R, config: EngineConfig) -> Self {
        Self::with_logger(renderer, config, Arc::new(TracingLogger))
    }

    pub fn with_logger(renderer: R, config: EngineConfig, logger: Arc<dyn Logger>) -> Self {
        let map = MapLifecycle::new(renderer, config.surface.clone())
            .with_theme(config.theme)
            .with_logger(logger.clone());
        let layers = LayerRegistry::new(config.cluster).with_logger(logger.clone());
        let selection = SelectionController::new(config.camera);
        Self {
            config,
            map,
            layers,
            selection,
            filters: FilterSet::default(),
            snapshots: HashMap::new(),
            status: HashMap::new(),
            geolocation: GeolocationState::default(),
            display: Vec::new(),
            display_generation: 0,
            next_generation: 0,
            skipped: Vec::new(),
            viewport: None,
            logger,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Mount the map into a container. See [`MapLifecycle::mount`].
    ///
    /// On first initialization the active mode's layer is attached and a
    /// pass is run.
    pub fn mount(&mut self, container: ContainerId) -> MountOutcome {
        let outcome = self.map.mount(container);
        self.after_mount(outcome);
        outcome
    }

    /// Retry a deferred mount.
    pub fn retry_mount(&mut self) -> Option<MountOutcome> {
        let outcome = self.map.retry_pending()?;
        self.after_mount(outcome);
        Some(outcome)
    }

    fn after_mount(&mut self, outcome: MountOutcome) {
        if outcome == MountOutcome::Initialized {
            let mode = self.mode();
            self.layers.switch_mode(mode, &mut self.map);
            self.refresh();
        }
    }

    /// Leave the map: destroy every layer and the surface.
    pub fn unmount(&mut self) {
        self.layers.clear(&mut self.map);
        self.map.unmount();
        self.selection.reset();
        self.display.clear();
        self.skipped.clear();
        self.viewport = None;
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    /// Switch the active mode.
    ///
    /// The old mode's layer is torn down before the new one is attached;
    /// the surface and camera stay. Filters and selection reset. Returns
    /// false if `mode` is already active.
    pub fn navigate(&mut self, mode: MapMode) -> bool {
        if mode == self.mode() {
            return false;
        }
        log_info!(self.logger, "navigating {} -> {}", self.mode(), mode);
        self.filters = FilterSet::new(mode);
        self.selection.reset();
        self.display.clear();
        self.skipped.clear();
        if self.map.is_ready() {
            self.layers.switch_mode(mode, &mut self.map);
        }
        self.refresh();
        true
    }

    /// Replace the snapshot of a mode. Older revisions are ignored.
    pub fn set_snapshot(&mut self, mode: MapMode, snapshot: ProviderSnapshot) -> bool {
        if let Some(current) = self.snapshots.get(&mode) {
            if snapshot.revision < current.revision {
                log_debug!(
                    self.logger,
                    "ignoring snapshot r{} for {} (have r{})",
                    snapshot.revision,
                    mode,
                    current.revision
                );
                return false;
            }
        }
        self.snapshots.insert(mode, snapshot);
        self.status.insert(mode, DataStatus::Ready);
        if mode == self.mode() {
            self.refresh();
        }
        true
    }

    pub fn set_feed_loading(&mut self, mode: MapMode) {
        self.status.insert(mode, DataStatus::Loading);
    }

    /// Record a data-layer failure. Markers and the surface are left alone.
    pub fn set_feed_failed(&mut self, mode: MapMode, message: impl Into<String>) {
        let message = message.into();
        log_warn!(self.logger, "provider feed for {} failed: {}", mode, message);
        self.status.insert(mode, DataStatus::Failed { message });
    }

    /// Mark a failed mode as loading again.
    ///
    /// Returns the mode to re-fetch, or `None` if the active mode has not
    /// failed.
    pub fn request_retry(&mut self) -> Option<MapMode> {
        let mode = self.mode();
        if !self.data_status().is_failed() {
            return None;
        }
        self.status.insert(mode, DataStatus::Loading);
        Some(mode)
    }

    /// Replace the filters. The mode stays the active one.
    pub fn set_filters(&mut self, filters: FilterSet) {
        let filters = filters.with_mode(self.mode());
        if filters == self.filters {
            return;
        }
        self.filters = filters;
        self.refresh();
    }

    /// Restore filters from a page query string.
    pub fn apply_query_string(&mut self, query_string: &str) {
        let filters = FilterSet::from_query_string(self.mode(), query_string);
        self.set_filters(filters);
    }

    pub fn query_string(&self) -> String {
        self.filters.to_query_string()
    }

    /// Set or forget the user position and recompute distances.
    pub fn set_user_position(&mut self, position: Option<Coordinates>) {
        match position {
            Some(position) => self.geolocation.resolve(position),
            None => self.geolocation.clear(),
        }
        self.refresh();
    }

    pub fn begin_locate(&mut self) {
        self.geolocation.begin();
    }

    /// A location request failed. The last known position stays in use.
    pub fn locate_failed(&mut self, error: GeolocationError) {
        log_warn!(self.logger, "geolocation failed: {}", error);
        self.geolocation.fail(error);
    }

    /// Select a provider, or clear the selection with `None`.
    ///
    /// Re-styles only the previously and newly selected markers and flies
    /// to the new one if it is on the map. No pass runs.
    pub fn select_provider(&mut self, id: Option<&str>) -> Option<SelectionChange> {
        let change = self.selection.select(id, &self.display)?;

        for entry in &mut self.display {
            if Some(entry.id()) == change.previous.as_deref() {
                entry.is_selected = false;
            }
            if Some(entry.id()) == change.current.as_deref() {
                entry.is_selected = true;
            }
        }

        if let Some(active) = self.layers.active() {
            if let Some(layer) = self.layers.layer_mut(active) {
                let renderer = self.map.renderer_mut();
                if let Some(previous) = change.previous.as_deref() {
                    layer.restyle(previous, false, renderer);
                }
                if let Some(current) = change.current.as_deref() {
                    layer.restyle(current, true, renderer);
                }
            }
        }

        if let Some(target) = change.camera_target {
            let camera = self.selection.camera();
            self.map
                .fly_to(target, camera.detail_zoom, camera.fly_duration);
        }

        Some(change)
    }

    /// Dispatch a renderer or UI event.
    pub fn handle_event(&mut self, event: MapEvent) {
        match event {
            MapEvent::MarkerClicked(id) => {
                self.select_provider(Some(&id));
            }
            MapEvent::ViewportChanged(viewport) => self.viewport = Some(viewport),
            MapEvent::ContainerResized => {
                self.map.invalidate_size();
            }
            MapEvent::CameraSettled { sequence } => {
                self.map.complete_camera(sequence);
            }
        }
    }

    pub fn set_theme(&mut self, theme: MapTheme) -> bool {
        self.map.set_theme(theme)
    }

    pub fn set_direction(&mut self, direction: TextDirection) {
        self.map.set_direction(direction);
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.map.set_fullscreen(fullscreen);
    }

    // =========================================================================
    // Passes
    // =========================================================================

    /// Compute the display set for the current inputs under a new generation.
    ///
    /// Touches no renderer state.
    pub fn prepare_pass(&mut self) -> DisplayPass {
        self.next_generation += 1;
        let mode = self.mode();
        let entities = match self.snapshots.get(&mode) {
            Some(snapshot) => compute_display_set(
                &snapshot.entities,
                &self.filters,
                self.geolocation.position,
                self.selection.state().selected_id(),
            ),
            None => Vec::new(),
        };
        DisplayPass {
            generation: self.next_generation,
            mode,
            entities,
        }
    }

    /// Make a prepared pass current and reconcile the active layer with it.
    ///
    /// Selection flags are taken from the current selection, not from the
    /// moment the pass was prepared.
    pub fn apply_pass(&mut self, mut pass: DisplayPass) -> PassResult {
        let generation = pass.generation;
        if pass.mode != self.mode() {
            return PassResult::Discarded {
                generation,
                reason: DiscardReason::ModeInactive,
            };
        }
        if generation <= self.display_generation {
            log_debug!(
                self.logger,
                "discarding pass {} (display is at {})",
                generation,
                self.display_generation
            );
            return PassResult::Discarded {
                generation,
                reason: DiscardReason::Superseded {
                    last_applied: self.display_generation,
                },
            };
        }

        let selected = self.selection.state().selected_id();
        for entry in &mut pass.entities {
            entry.is_selected = selected == Some(entry.id());
        }

        self.display_generation = generation;
        self.display = pass.entities.clone();

        let layer = match (self.map.is_ready(), self.layers.layer_mut(pass.mode)) {
            (true, Some(layer)) => layer,
            _ => {
                return PassResult::Discarded {
                    generation,
                    reason: DiscardReason::SurfaceNotReady,
                }
            }
        };

        match layer.run_pass(pass, self.map.renderer_mut()) {
            PassOutcome::Applied(report) => {
                self.skipped = report.skipped.clone();
                PassResult::Applied(report)
            }
            PassOutcome::Stale { last_applied, .. } => PassResult::Discarded {
                generation,
                reason: DiscardReason::Superseded { last_applied },
            },
        }
    }

    /// Prepare and apply a pass in one step.
    pub fn refresh(&mut self) -> PassResult {
        let pass = self.prepare_pass();
        self.apply_pass(pass)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn mode(&self) -> MapMode {
        self.filters.mode
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// The ordered display set of the last applied pass.
    pub fn display_set(&self) -> &[DisplayEntity] {
        &self.display
    }

    pub fn selection(&self) -> &SelectionState {
        self.selection.state()
    }

    /// Data status of the active mode.
    pub fn data_status(&self) -> &DataStatus {
        static LOADING: DataStatus = DataStatus::Loading;
        self.status.get(&self.mode()).unwrap_or(&LOADING)
    }

    pub fn geolocation(&self) -> &GeolocationState {
        &self.geolocation
    }

    /// Entities of the last applied pass that got no marker.
    pub fn skipped(&self) -> &[SkippedEntity] {
        &self.skipped
    }

    pub fn snapshot(&self, mode: MapMode) -> Option<&ProviderSnapshot> {
        self.snapshots.get(&mode)
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn generation(&self) -> u64 {
        self.display_generation
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn lifecycle(&self) -> &MapLifecycle<R> {
        &self.map
    }

    pub fn layers(&self) -> &LayerRegistry {
        &self.layers
    }

    /// Layer of the active mode, if attached.
    pub fn active_layer(&self) -> Option<LayerHandle> {
        self.layers.active().and_then(|mode| self.layers.handle(mode))
    }

    pub fn renderer(&self) -> &R {
        self.map.renderer()
    }

    /// Direct renderer access, e.g. to simulate container state in tests.
    pub fn renderer_mut(&mut self) -> &mut R {
        self.map.renderer_mut()
    }

    /// Snapshot for list and detail views.
    pub fn view(&self) -> EngineView {
        EngineView {
            mode: self.mode(),
            status: self.data_status().clone(),
            display: self.display.clone(),
            selected: self.selection().selected_id().map(str::to_string),
            geolocation: self.geolocation.clone(),
            query_string: self.query_string(),
            generation: self.display_generation,
            skipped: self.skipped.len(),
        }
    }
}

impl<R: MapRenderer> std::fmt::Debug for MapEngine<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapEngine")
            .field("mode", &self.mode())
            .field("state", &self.map.state())
            .field("layers", &self.layers)
            .field("display", &self.display.len())
            .field("generation", &self.display_generation)
            .finish()
    }
}
