//! Mounting and tearing down the map surface.

use std::sync::Arc;
use std::time::Duration;

use super::camera::{CameraAnimation, CameraRequest};
use super::theme::MapTheme;
use crate::config::defaults;
use crate::geo::Coordinates;
use crate::log::{Logger, NoOpLogger};
use crate::render::{
    ContainerId, LayerId, MapRenderer, RenderError, SurfaceId, TextDirection, TileLayerSpec,
    Viewport,
};
use crate::{log_debug, log_info, log_warn};

/// Lifecycle state of the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Uninitialized,
    /// Waiting for the container to be attached
    Pending { attempts: u32 },
    Ready { theme: MapTheme },
}

/// What a mount request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    /// The surface was created by this call
    Initialized,
    /// The surface already existed
    AlreadyReady,
    /// The container is not attached yet; the mount will be retried
    Deferred { attempts: u32 },
}

/// Tile sources and initial camera for a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceOptions {
    pub light_tiles: String,
    pub dark_tiles: String,
    pub attribution: String,
    pub initial_viewport: Viewport,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            light_tiles: defaults::LIGHT_TILES.to_string(),
            dark_tiles: defaults::DARK_TILES.to_string(),
            attribution: defaults::ATTRIBUTION.to_string(),
            initial_viewport: Viewport {
                center: Coordinates::new(defaults::DEFAULT_LATITUDE, defaults::DEFAULT_LONGITUDE),
                zoom: defaults::DEFAULT_ZOOM,
            },
        }
    }
}

impl SurfaceOptions {
    pub fn tiles_for(&self, theme: MapTheme) -> TileLayerSpec {
        let url = match theme {
            MapTheme::Light => &self.light_tiles,
            MapTheme::Dark => &self.dark_tiles,
        };
        TileLayerSpec {
            url: url.clone(),
            attribution: self.attribution.clone(),
        }
    }
}

/// Owner of the renderer and its single surface.
pub struct MapLifecycle<R: MapRenderer> {
    renderer: R,
    options: SurfaceOptions,
    state: LifecycleState,
    surface: Option<SurfaceId>,
    container: Option<ContainerId>,
    theme: MapTheme,
    direction: TextDirection,
    fullscreen: bool,
    /// Layers that should be on the surface, in attach order
    layers: Vec<LayerId>,
    camera: Option<CameraAnimation>,
    camera_sequence: u64,
    logger: Arc<dyn Logger>,
}

impl<R: MapRenderer> MapLifecycle<R> {
    pub fn new(renderer: R, options: SurfaceOptions) -> Self {
        Self {
            renderer,
            options,
            state: LifecycleState::Uninitialized,
            surface: None,
            container: None,
            theme: MapTheme::default(),
            direction: TextDirection::default(),
            fullscreen: false,
            layers: Vec::new(),
            camera: None,
            camera_sequence: 0,
            logger: Arc::new(NoOpLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Theme applied when the surface is created.
    pub fn with_theme(mut self, theme: MapTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, LifecycleState::Ready { .. })
    }

    pub fn surface(&self) -> Option<SurfaceId> {
        self.surface
    }

    pub fn theme(&self) -> MapTheme {
        self.theme
    }

    pub fn direction(&self) -> TextDirection {
        self.direction
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn options(&self) -> &SurfaceOptions {
        &self.options
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Layers the surface shows, or will show once ready.
    pub fn attached_layers(&self) -> &[LayerId] {
        &self.layers
    }

    /// The camera animation currently in flight.
    pub fn camera(&self) -> Option<&CameraAnimation> {
        self.camera.as_ref()
    }

    /// Create the surface in `container` unless it already exists.
    ///
    /// A detached container defers initialization; the caller never sees an
    /// error. Mounting again while ready does nothing.
    pub fn mount(&mut self, container: ContainerId) -> MountOutcome {
        if self.is_ready() {
            return MountOutcome::AlreadyReady;
        }
        self.container = Some(container);
        self.try_initialize()
    }

    /// Retry a deferred mount. Returns `None` unless the state is pending.
    pub fn retry_pending(&mut self) -> Option<MountOutcome> {
        match self.state {
            LifecycleState::Pending { .. } => Some(self.try_initialize()),
            _ => None,
        }
    }

    fn try_initialize(&mut self) -> MountOutcome {
        let Some(container) = self.container.clone() else {
            return MountOutcome::Deferred { attempts: 0 };
        };

        match self
            .renderer
            .create_surface(&container, self.options.initial_viewport)
        {
            Ok(surface) => {
                self.surface = Some(surface);
                let tiles = self.options.tiles_for(self.theme);
                self.renderer.set_tile_layer(surface, &tiles);
                if self.direction != TextDirection::Ltr {
                    self.renderer.set_controls_direction(surface, self.direction);
                }
                for layer in &self.layers {
                    self.renderer.attach_layer(surface, *layer);
                }
                self.state = LifecycleState::Ready { theme: self.theme };
                log_info!(self.logger, "map surface ready in '{}'", container);
                MountOutcome::Initialized
            }
            Err(error) => {
                let attempts = match self.state {
                    LifecycleState::Pending { attempts } => attempts + 1,
                    _ => 1,
                };
                self.state = LifecycleState::Pending { attempts };
                match error {
                    RenderError::ContainerDetached(_) => log_debug!(
                        self.logger,
                        "container '{}' not attached, deferring mount (attempt {})",
                        container,
                        attempts
                    ),
                    other => log_warn!(
                        self.logger,
                        "surface creation failed, deferring mount (attempt {}): {}",
                        attempts,
                        other
                    ),
                }
                MountOutcome::Deferred { attempts }
            }
        }
    }

    /// Tear the surface down. Layers are forgotten; the theme is kept.
    pub fn unmount(&mut self) {
        if let Some(surface) = self.surface.take() {
            self.renderer.destroy_surface(surface);
            log_info!(self.logger, "map surface destroyed");
        }
        self.state = LifecycleState::Uninitialized;
        self.container = None;
        self.layers.clear();
        self.camera = None;
    }

    /// Switch tiles. Only the tile URL changes; markers and camera stay.
    ///
    /// Returns true if the renderer was asked to swap tiles.
    pub fn set_theme(&mut self, theme: MapTheme) -> bool {
        if self.theme == theme {
            return false;
        }
        self.theme = theme;
        match (self.state, self.surface) {
            (LifecycleState::Ready { .. }, Some(surface)) => {
                let tiles = self.options.tiles_for(theme);
                self.renderer.set_tile_layer(surface, &tiles);
                self.state = LifecycleState::Ready { theme };
                true
            }
            _ => false,
        }
    }

    /// Recompute the surface size after a layout change.
    pub fn invalidate_size(&mut self) -> bool {
        match self.ready_surface() {
            Some(surface) => {
                self.renderer.invalidate_size(surface);
                true
            }
            None => false,
        }
    }

    /// Enter or leave fullscreen; the size is invalidated on change.
    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        if self.fullscreen == fullscreen {
            return;
        }
        self.fullscreen = fullscreen;
        self.invalidate_size();
    }

    /// Move overlay controls for the layout direction.
    pub fn set_direction(&mut self, direction: TextDirection) {
        if self.direction == direction {
            return;
        }
        self.direction = direction;
        if let Some(surface) = self.ready_surface() {
            self.renderer.set_controls_direction(surface, direction);
        }
    }

    /// Show a layer. Before the surface exists the layer is remembered and
    /// attached on initialization.
    pub fn attach_layer(&mut self, layer: LayerId) {
        if self.layers.contains(&layer) {
            return;
        }
        self.layers.push(layer);
        if let Some(surface) = self.ready_surface() {
            self.renderer.attach_layer(surface, layer);
        }
    }

    pub fn detach_layer(&mut self, layer: LayerId) {
        let before = self.layers.len();
        self.layers.retain(|l| *l != layer);
        if self.layers.len() == before {
            return;
        }
        if let Some(surface) = self.ready_surface() {
            self.renderer.detach_layer(surface, layer);
        }
    }

    /// Animate the camera. A newer request supersedes the one in flight.
    ///
    /// Returns `None` when there is no surface to move.
    pub fn fly_to(
        &mut self,
        target: Coordinates,
        zoom: f64,
        duration: Duration,
    ) -> Option<CameraAnimation> {
        let surface = self.ready_surface()?;
        self.camera_sequence += 1;
        let animation = CameraAnimation {
            sequence: self.camera_sequence,
            request: CameraRequest {
                target,
                zoom,
                duration,
            },
            superseded: self.camera.map(|c| c.sequence),
        };
        self.renderer.fly_to(surface, target, zoom, duration);
        self.camera = Some(animation);
        Some(animation)
    }

    /// Mark an animation finished. Ignored unless it is the one in flight.
    pub fn complete_camera(&mut self, sequence: u64) -> bool {
        match self.camera {
            Some(current) if current.sequence == sequence => {
                self.camera = None;
                true
            }
            _ => false,
        }
    }

    fn ready_surface(&self) -> Option<SurfaceId> {
        match self.state {
            LifecycleState::Ready { .. } => self.surface,
            _ => None,
        }
    }
}

impl<R: MapRenderer + std::fmt::Debug> std::fmt::Debug for MapLifecycle<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapLifecycle")
            .field("state", &self.state)
            .field("surface", &self.surface)
            .field("layers", &self.layers)
            .field("camera", &self.camera)
            .finish()
    }
}
