//! Selected provider and the camera moves it triggers.

use std::time::Duration;

use crate::config::defaults;
use crate::geo::Coordinates;
use crate::provider::DisplayEntity;

/// Which provider, if any, is selected. At most one at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<String>,
}

impl SelectionState {
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }
}

/// Zoom and duration of the fly-to after a selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub detail_zoom: f64,
    pub fly_duration: Duration,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            detail_zoom: defaults::DETAIL_ZOOM,
            fly_duration: Duration::from_millis(defaults::FLY_DURATION_MS),
        }
    }
}

/// A selection transition to apply.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionChange {
    /// Marker to re-style as unselected
    pub previous: Option<String>,
    /// Marker to re-style as selected
    pub current: Option<String>,
    /// Where to fly, if the new selection is on the map
    pub camera_target: Option<Coordinates>,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    state: SelectionState,
    camera: CameraConfig,
}

impl SelectionController {
    pub fn new(camera: CameraConfig) -> Self {
        Self {
            state: SelectionState::default(),
            camera,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn camera(&self) -> CameraConfig {
        self.camera
    }

    /// Select `id`, or clear the selection with `None`.
    ///
    /// Returns `None` when nothing changes (selecting the current id again,
    /// or clearing an empty selection). The camera target is set only when
    /// the id is in `display` with valid coordinates; selecting an id that
    /// is not shown still updates the state.
    pub fn select(&mut self, id: Option<&str>, display: &[DisplayEntity]) -> Option<SelectionChange> {
        if self.state.selected.as_deref() == id {
            return None;
        }

        let previous = self.state.selected.take();
        self.state.selected = id.map(str::to_string);

        let camera_target = id.and_then(|id| {
            display
                .iter()
                .find(|d| d.id() == id)
                .map(DisplayEntity::coordinates)
                .filter(Coordinates::is_valid)
        });

        Some(SelectionChange {
            previous,
            current: self.state.selected.clone(),
            camera_target,
        })
    }

    /// Forget the selection without producing a change, e.g. on unmount.
    pub fn reset(&mut self) {
        self.state = SelectionState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{ProviderEntity, ProviderType};

    fn shown(id: &str, lat: f64) -> DisplayEntity {
        DisplayEntity {
            entity: ProviderEntity::new(id, ProviderType::Doctor, Coordinates::new(lat, -0.63)),
            distance_km: None,
            is_selected: false,
        }
    }

    #[test]
    fn test_select_then_switch() {
        let display = vec![shown("x", 35.1), shown("y", 35.2)];
        let mut controller = SelectionController::default();

        let first = controller.select(Some("x"), &display).unwrap();
        assert_eq!(first.previous, None);
        assert_eq!(first.current.as_deref(), Some("x"));
        assert_eq!(first.camera_target, Some(Coordinates::new(35.1, -0.63)));

        let second = controller.select(Some("y"), &display).unwrap();
        assert_eq!(second.previous.as_deref(), Some("x"));
        assert_eq!(second.current.as_deref(), Some("y"));
        assert!(controller.state().is_selected("y"));
        assert!(!controller.state().is_selected("x"));
    }

    #[test]
    fn test_reselect_is_noop() {
        let display = vec![shown("x", 35.1)];
        let mut controller = SelectionController::default();
        controller.select(Some("x"), &display);
        assert_eq!(controller.select(Some("x"), &display), None);
        assert_eq!(controller.select(None, &[]).map(|c| c.current), Some(None));
        assert_eq!(controller.select(None, &[]), None);
    }

    #[test]
    fn test_hidden_selection_moves_no_camera() {
        let mut controller = SelectionController::default();
        let change = controller.select(Some("ghost"), &[shown("x", 35.1)]).unwrap();
        assert_eq!(change.camera_target, None);
        assert_eq!(controller.state().selected_id(), Some("ghost"));
    }

    #[test]
    fn test_default_camera() {
        let camera = CameraConfig::default();
        assert_eq!(camera.detail_zoom, 16.0);
        assert_eq!(camera.fly_duration, Duration::from_millis(800));
    }
}
