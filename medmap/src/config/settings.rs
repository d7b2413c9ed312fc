//! One struct per `[section]` of config.ini. Pure data.

use std::path::PathBuf;

use crate::surface::MapTheme;

/// Complete user configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub map: MapSettings,
    pub cluster: ClusterSettings,
    pub camera: CameraSettings,
    pub logging: LoggingSettings,
}

/// `[map]`
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    /// Tile URL template for the light theme
    pub light_tiles: String,
    /// Tile URL template for the dark theme
    pub dark_tiles: String,
    pub attribution: String,
    pub theme: MapTheme,
    pub default_latitude: f64,
    pub default_longitude: f64,
    pub default_zoom: f64,
}

/// `[cluster]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterSettings {
    pub radius_px: u32,
    pub disable_clustering_at_zoom: u8,
}

/// `[camera]`
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSettings {
    /// Zoom used when flying to a selected provider
    pub detail_zoom: f64,
    pub fly_duration_ms: u64,
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub file: PathBuf,
}
