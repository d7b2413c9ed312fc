//! Read-only snapshot of engine state for the UI.

use crate::geolocation::GeolocationState;
use crate::mode::MapMode;
use crate::provider::DisplayEntity;

use super::events::DataStatus;

/// Read-only snapshot of engine state for list and detail views.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineView {
    pub mode: MapMode,
    pub status: DataStatus,
    pub display: Vec<DisplayEntity>,
    pub selected: Option<String>,
    pub geolocation: GeolocationState,
    /// Filter state mirrored for the page URL
    pub query_string: String,
    /// Generation of the last pass that produced `display`
    pub generation: u64,
    /// Entities of the last pass that got no marker
    pub skipped: usize,
}

impl EngineView {
    pub fn selected_entity(&self) -> Option<&DisplayEntity> {
        let id = self.selected.as_deref()?;
        self.display.iter().find(|d| d.id() == id)
    }
}
