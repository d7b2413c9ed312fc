//! Runtime engine settings assembled from defaults and the config file.

use std::time::Duration;

use super::settings::ConfigFile;
use crate::cluster::ClusterOptions;
use crate::geo::Coordinates;
use crate::render::Viewport;
use crate::selection::CameraConfig;
use crate::surface::{MapTheme, SurfaceOptions};

/// Typed configuration consumed by [`MapEngine`](crate::engine::MapEngine).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineConfig {
    pub surface: SurfaceOptions,
    pub cluster: ClusterOptions,
    pub camera: CameraConfig,
    /// Theme used when the surface is first created
    pub theme: MapTheme,
}

impl EngineConfig {
    pub fn with_theme(mut self, theme: MapTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_cluster(mut self, cluster: ClusterOptions) -> Self {
        self.cluster = cluster;
        self
    }

    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }
}

impl From<&ConfigFile> for EngineConfig {
    fn from(file: &ConfigFile) -> Self {
        Self {
            surface: SurfaceOptions {
                light_tiles: file.map.light_tiles.clone(),
                dark_tiles: file.map.dark_tiles.clone(),
                attribution: file.map.attribution.clone(),
                initial_viewport: Viewport {
                    center: Coordinates::new(file.map.default_latitude, file.map.default_longitude),
                    zoom: file.map.default_zoom,
                },
            },
            cluster: ClusterOptions::default()
                .with_radius(file.cluster.radius_px)
                .with_disable_clustering_at_zoom(file.cluster.disable_clustering_at_zoom),
            camera: CameraConfig {
                detail_zoom: file.camera.detail_zoom,
                fly_duration: Duration::from_millis(file.camera.fly_duration_ms),
            },
            theme: file.map.theme,
        }
    }
}
