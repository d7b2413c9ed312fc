//! Serialization: `ConfigFile` → commented INI text.

use std::path::Path;

use super::settings::ConfigFile;

pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[map]
; Tile URL templates per theme. Must contain {{z}}, {{x}} and {{y}}.
light_tiles = {}
dark_tiles = {}
attribution = {}
; Base map theme: light or dark (default: light)
theme = {}
; Initial camera position and zoom
default_latitude = {}
default_longitude = {}
default_zoom = {}

[cluster]
; Pixel radius within which markers merge into a cluster (40-50, default: 45)
radius_px = {}
; Zoom level from which markers are never clustered (default: 16)
disable_clustering_at_zoom = {}

[camera]
; Zoom used when flying to a selected provider (default: 16)
detail_zoom = {}
; Fly-to animation duration in milliseconds (default: 800)
fly_duration_ms = {}

[logging]
; Log file path (default: ~/.medmap/medmap.log)
file = {}
"#,
        config.map.light_tiles,
        config.map.dark_tiles,
        config.map.attribution,
        config.map.theme,
        config.map.default_latitude,
        config.map.default_longitude,
        config.map.default_zoom,
        config.cluster.radius_px,
        config.cluster.disable_clustering_at_zoom,
        config.camera.detail_zoom,
        config.camera.fly_duration_ms,
        path_to_string(&config.logging.file),
    )
}

fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_written_config_is_commented() {
        let text = to_config_string(&ConfigFile::default());
        assert!(text.contains("[cluster]\n; Pixel radius"));
        assert!(text.contains("radius_px = 45"));
        assert!(text.contains("fly_duration_ms = 800"));
        assert!(text.contains("{z}/{x}/{y}"));
    }

    #[test]
    fn test_written_config_parses_back() {
        let original = ConfigFile::default();
        let parsed = ConfigFile::from_ini_str(&to_config_string(&original)).unwrap();
        assert_eq!(parsed, original);
    }
}
