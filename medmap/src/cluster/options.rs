//! Cluster radius and zoom settings.

use crate::config::defaults;

/// Smallest recommended cluster radius.
pub const MIN_RADIUS_PX: u32 = 40;
/// Largest recommended cluster radius.
pub const MAX_RADIUS_PX: u32 = 50;

/// Options passed to the renderer when a clustering layer is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterOptions {
    /// Pixel radius within which markers merge into a cluster
    pub radius_px: u32,
    /// Zoom level from which markers are never clustered
    pub disable_clustering_at_zoom: u8,
    /// Fan out overlapping markers at maximum zoom
    pub spiderfy_on_max_zoom: bool,
    pub show_coverage_on_hover: bool,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            radius_px: defaults::CLUSTER_RADIUS_PX,
            disable_clustering_at_zoom: defaults::DISABLE_CLUSTERING_AT_ZOOM,
            spiderfy_on_max_zoom: true,
            show_coverage_on_hover: false,
        }
    }
}

impl ClusterOptions {
    pub fn with_radius(mut self, radius_px: u32) -> Self {
        self.radius_px = radius_px;
        self
    }

    pub fn with_disable_clustering_at_zoom(mut self, zoom: u8) -> Self {
        self.disable_clustering_at_zoom = zoom;
        self
    }

    /// True if `radius_px` lies in the recommended range.
    pub fn radius_in_range(&self) -> bool {
        (MIN_RADIUS_PX..=MAX_RADIUS_PX).contains(&self.radius_px)
    }
}
