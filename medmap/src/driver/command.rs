//! Commands the UI sends to a running driver.

use crate::engine::MapEvent;
use crate::filter::FilterSet;
use crate::geo::Coordinates;
use crate::mode::MapMode;
use crate::render::{ContainerId, TextDirection};
use crate::surface::MapTheme;

/// A request from the host UI.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    Mount(ContainerId),
    RetryMount,
    Unmount,
    Navigate(MapMode),
    SetFilters(FilterSet),
    ApplyQueryString(String),
    SelectProvider(Option<String>),
    Event(MapEvent),
    /// Ask the geolocator for the user position
    LocateUser,
    /// Override the user position, e.g. from a manual pick
    SetUserPosition(Option<Coordinates>),
    SetTheme(MapTheme),
    SetDirection(TextDirection),
    SetFullscreen(bool),
    /// Re-fetch the active mode after a feed failure
    RetryFeed,
}
