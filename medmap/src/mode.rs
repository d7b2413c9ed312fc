//! Map display modes.
//!
//! Each mode is one route of the map experience with its own provider
//! subscription and its own cluster layer. All modes share one surface.

use std::fmt;
use std::str::FromStr;

/// One of the three map views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MapMode {
    /// Every provider
    #[default]
    Providers,
    /// Emergency-capable providers only
    Emergency,
    /// Blood donation points only
    Blood,
}

impl MapMode {
    pub const ALL: [MapMode; 3] = [MapMode::Providers, MapMode::Emergency, MapMode::Blood];

    /// Key used for layer registration, routes and config.
    pub fn as_str(&self) -> &'static str {
        match self {
            MapMode::Providers => "providers",
            MapMode::Emergency => "emergency",
            MapMode::Blood => "blood",
        }
    }
}

impl fmt::Display for MapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MapMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "providers" | "all" => Ok(MapMode::Providers),
            "emergency" => Ok(MapMode::Emergency),
            "blood" => Ok(MapMode::Blood),
            other => Err(format!(
                "unknown map mode '{}' (expected providers, emergency or blood)",
                other
            )),
        }
    }
}
