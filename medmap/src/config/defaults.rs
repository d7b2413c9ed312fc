//! Default values and limits for every setting.

use std::path::PathBuf;

use super::file::config_directory;
use super::settings::*;
use crate::surface::MapTheme;

// =============================================================================
// Map
// =============================================================================

pub const LIGHT_TILES: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DARK_TILES: &str = "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png";
pub const ATTRIBUTION: &str = "© OpenStreetMap contributors";
pub const DEFAULT_THEME: MapTheme = MapTheme::Light;
/// Initial camera center (Sidi Bel Abbès).
pub const DEFAULT_LATITUDE: f64 = 35.1975;
pub const DEFAULT_LONGITUDE: f64 = -0.63;
pub const DEFAULT_ZOOM: f64 = 13.0;
pub const MAX_ZOOM: f64 = 22.0;

// =============================================================================
// Cluster
// =============================================================================

pub const CLUSTER_RADIUS_PX: u32 = 45;
pub const DISABLE_CLUSTERING_AT_ZOOM: u8 = 16;

// =============================================================================
// Camera
// =============================================================================

pub const DETAIL_ZOOM: f64 = 16.0;
pub const FLY_DURATION_MS: u64 = 800;

pub const LOG_FILE_NAME: &str = "medmap.log";

pub fn default_log_file() -> PathBuf {
    config_directory().join(LOG_FILE_NAME)
}

/// Clamps the cluster radius to the supported range, warning when it does.
pub(super) fn clamp_cluster_radius(value: u32) -> u32 {
    use crate::cluster::{MAX_RADIUS_PX, MIN_RADIUS_PX};

    if value < MIN_RADIUS_PX {
        tracing::warn!(
            requested = value,
            min = MIN_RADIUS_PX,
            max = MAX_RADIUS_PX,
            "cluster radius_px below minimum, clamping to {}",
            MIN_RADIUS_PX
        );
        MIN_RADIUS_PX
    } else if value > MAX_RADIUS_PX {
        tracing::warn!(
            requested = value,
            min = MIN_RADIUS_PX,
            max = MAX_RADIUS_PX,
            "cluster radius_px above maximum, clamping to {}",
            MAX_RADIUS_PX
        );
        MAX_RADIUS_PX
    } else {
        value
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            map: MapSettings {
                light_tiles: LIGHT_TILES.to_string(),
                dark_tiles: DARK_TILES.to_string(),
                attribution: ATTRIBUTION.to_string(),
                theme: DEFAULT_THEME,
                default_latitude: DEFAULT_LATITUDE,
                default_longitude: DEFAULT_LONGITUDE,
                default_zoom: DEFAULT_ZOOM,
            },
            cluster: ClusterSettings {
                radius_px: CLUSTER_RADIUS_PX,
                disable_clustering_at_zoom: DISABLE_CLUSTERING_AT_ZOOM,
            },
            camera: CameraSettings {
                detail_zoom: DETAIL_ZOOM,
                fly_duration_ms: FLY_DURATION_MS,
            },
            logging: LoggingSettings {
                file: default_log_file(),
            },
        }
    }
}
