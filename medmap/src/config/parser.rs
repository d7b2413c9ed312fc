//! INI parsing: `Ini` → `ConfigFile`.
//!
//! The only place INI key names map to struct fields.

use std::path::PathBuf;
use std::str::FromStr;

use ini::{Ini, Properties};

use super::defaults::{clamp_cluster_radius, MAX_ZOOM};
use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::geo::{MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};
use crate::surface::MapTheme;

/// Overlay the values found in `ini` onto the defaults.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [map] section
    if let Some(section) = ini.section(Some("map")) {
        if let Some(v) = non_empty(section, "light_tiles") {
            config.map.light_tiles = tile_template("light_tiles", v)?;
        }
        if let Some(v) = non_empty(section, "dark_tiles") {
            config.map.dark_tiles = tile_template("dark_tiles", v)?;
        }
        if let Some(v) = non_empty(section, "attribution") {
            config.map.attribution = v.to_string();
        }
        if let Some(v) = non_empty(section, "theme") {
            config.map.theme = v
                .parse::<MapTheme>()
                .map_err(|_| invalid("map", "theme", v, "must be 'light' or 'dark'"))?;
        }
        if let Some(v) = non_empty(section, "default_latitude") {
            config.map.default_latitude = parse_in_range(
                "map",
                "default_latitude",
                v,
                MIN_LAT,
                MAX_LAT,
                "must be a number between -90 and 90",
            )?;
        }
        if let Some(v) = non_empty(section, "default_longitude") {
            config.map.default_longitude = parse_in_range(
                "map",
                "default_longitude",
                v,
                MIN_LON,
                MAX_LON,
                "must be a number between -180 and 180",
            )?;
        }
        if let Some(v) = non_empty(section, "default_zoom") {
            config.map.default_zoom = parse_in_range(
                "map",
                "default_zoom",
                v,
                0.0,
                MAX_ZOOM,
                "must be a number between 0 and 22",
            )?;
        }
    }

    // [cluster] section
    if let Some(section) = ini.section(Some("cluster")) {
        if let Some(v) = non_empty(section, "radius_px") {
            let parsed: u32 = parse("cluster", "radius_px", v, "must be a positive integer")?;
            config.cluster.radius_px = clamp_cluster_radius(parsed);
        }
        if let Some(v) = non_empty(section, "disable_clustering_at_zoom") {
            let zoom: u8 = parse(
                "cluster",
                "disable_clustering_at_zoom",
                v,
                "must be an integer between 0 and 22",
            )?;
            if f64::from(zoom) > MAX_ZOOM {
                return Err(invalid(
                    "cluster",
                    "disable_clustering_at_zoom",
                    v,
                    "must be an integer between 0 and 22",
                ));
            }
            config.cluster.disable_clustering_at_zoom = zoom;
        }
    }

    // [camera] section
    if let Some(section) = ini.section(Some("camera")) {
        if let Some(v) = non_empty(section, "detail_zoom") {
            config.camera.detail_zoom = parse_in_range(
                "camera",
                "detail_zoom",
                v,
                0.0,
                MAX_ZOOM,
                "must be a number between 0 and 22",
            )?;
        }
        if let Some(v) = non_empty(section, "fly_duration_ms") {
            config.camera.fly_duration_ms = parse(
                "camera",
                "fly_duration_ms",
                v,
                "must be a non-negative integer (milliseconds)",
            )?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = non_empty(section, "file") {
            config.logging.file = expand_tilde(v);
        }
    }

    Ok(config)
}

fn non_empty<'a>(section: &'a Properties, key: &str) -> Option<&'a str> {
    section.get(key).map(str::trim).filter(|v| !v.is_empty())
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse<T: FromStr>(section: &str, key: &str, value: &str, reason: &str) -> Result<T, ConfigFileError> {
    value
        .parse()
        .map_err(|_| invalid(section, key, value, reason))
}

fn parse_in_range(
    section: &str,
    key: &str,
    value: &str,
    min: f64,
    max: f64,
    reason: &str,
) -> Result<f64, ConfigFileError> {
    let parsed: f64 = parse(section, key, value, reason)?;
    if !parsed.is_finite() || parsed < min || parsed > max {
        return Err(invalid(section, key, value, reason));
    }
    Ok(parsed)
}

fn tile_template(key: &str, value: &str) -> Result<String, ConfigFileError> {
    let has_placeholders = ["{z}", "{x}", "{y}"].iter().all(|p| value.contains(p));
    if !has_placeholders {
        return Err(invalid(
            "map",
            key,
            value,
            "tile URL must contain {z}, {x} and {y} placeholders",
        ));
    }
    Ok(value.to_string())
}

pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;

    fn load(text: &str) -> Result<ConfigFile, ConfigFileError> {
        ConfigFile::from_ini_str(text)
    }

    #[test]
    fn test_empty_ini_gives_defaults() {
        let config = load("").unwrap();
        assert_eq!(config.cluster.radius_px, CLUSTER_RADIUS_PX);
        assert_eq!(config.camera.detail_zoom, DETAIL_ZOOM);
        assert_eq!(config.map.theme, MapTheme::Light);
    }

    #[test]
    fn test_overrides() {
        let config = load(
            r#"
[map]
theme = dark
default_latitude = 36.75
default_longitude = 3.06
default_zoom = 12

[cluster]
radius_px = 48
disable_clustering_at_zoom = 15

[camera]
detail_zoom = 17
fly_duration_ms = 500
"#,
        )
        .unwrap();
        assert_eq!(config.map.theme, MapTheme::Dark);
        assert_eq!(config.map.default_latitude, 36.75);
        assert_eq!(config.map.default_zoom, 12.0);
        assert_eq!(config.cluster.radius_px, 48);
        assert_eq!(config.cluster.disable_clustering_at_zoom, 15);
        assert_eq!(config.camera.detail_zoom, 17.0);
        assert_eq!(config.camera.fly_duration_ms, 500);
    }

    #[test]
    fn test_radius_is_clamped() {
        let config = load("[cluster]\nradius_px = 120\n").unwrap();
        assert_eq!(config.cluster.radius_px, 50);
        let config = load("[cluster]\nradius_px = 5\n").unwrap();
        assert_eq!(config.cluster.radius_px, 40);
    }

    #[test]
    fn test_invalid_theme_names_key() {
        let err = load("[map]\ntheme = sepia\n").unwrap_err();
        match err {
            ConfigFileError::InvalidValue {
                section,
                key,
                value,
                ..
            } => {
                assert_eq!(section, "map");
                assert_eq!(key, "theme");
                assert_eq!(value, "sepia");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_latitude_out_of_range() {
        let err = load("[map]\ndefault_latitude = 91\n").unwrap_err();
        assert!(err.to_string().contains("map.default_latitude"));
    }

    #[test]
    fn test_non_numeric_duration() {
        let err = load("[camera]\nfly_duration_ms = fast\n").unwrap_err();
        assert!(err.to_string().contains("milliseconds"));
    }

    #[test]
    fn test_tile_template_needs_placeholders() {
        assert!(load("[map]\nlight_tiles = https://example.com/tile.png\n").is_err());
        let config = load("[map]\ndark_tiles = https://tiles.example.com/{z}/{x}/{y}.png\n").unwrap();
        assert_eq!(config.map.dark_tiles, "https://tiles.example.com/{z}/{x}/{y}.png");
    }

    #[test]
    fn test_expand_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/logs/medmap.log"), home.join("logs/medmap.log"));
        }
        assert_eq!(expand_tilde("/var/log/medmap.log"), PathBuf::from("/var/log/medmap.log"));
    }
}
