//! Tile themes for the base map.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Base map color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MapTheme {
    #[default]
    Light,
    Dark,
}

impl MapTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            MapTheme::Light => "light",
            MapTheme::Dark => "dark",
        }
    }
}

impl fmt::Display for MapTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme '{0}' (expected light or dark)")]
pub struct ParseThemeError(pub String);

impl FromStr for MapTheme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(MapTheme::Light),
            "dark" => Ok(MapTheme::Dark),
            other => Err(ParseThemeError(other.to_string())),
        }
    }
}
