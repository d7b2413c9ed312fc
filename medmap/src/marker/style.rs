//! Marker visuals.
//!
//! A marker's look is a pure function of the active mode and three entity
//! properties: type, selection and emergency capability. Nothing else
//! (distance, name, open state) influences it, so re-styling only ever
//! happens when one of those inputs changes.

use crate::mode::MapMode;
use crate::provider::{DisplayEntity, ProviderType};

/// Base marker diameter in pixels.
pub const BASE_SIZE_PX: u16 = 32;
/// Marker diameter when selected.
pub const SELECTED_SIZE_PX: u16 = 44;
pub const BASE_BORDER_PX: u8 = 2;
pub const SELECTED_BORDER_PX: u8 = 4;

/// Glyph drawn inside the marker, one per provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerShape {
    Cross,
    Circle,
    Stethoscope,
    Capsule,
    Flask,
    Scanner,
    Drop,
    Toolbox,
    Cradle,
}

/// Everything a renderer needs to draw one marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerStyle {
    pub shape: MarkerShape,
    /// Fill color as `#rrggbb`
    pub color: &'static str,
    pub size_px: u16,
    pub border_px: u8,
    /// Pulsing halo animation
    pub pulsing: bool,
}

/// The only entity properties that determine a marker's style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleInputs {
    pub provider_type: ProviderType,
    pub is_selected: bool,
    pub is_emergency_capable: bool,
}

impl StyleInputs {
    pub fn of(display: &DisplayEntity) -> Self {
        Self {
            provider_type: display.entity.provider_type,
            is_selected: display.is_selected,
            is_emergency_capable: display.entity.is_emergency_capable,
        }
    }

    pub fn with_selected(self, is_selected: bool) -> Self {
        Self {
            is_selected,
            ..self
        }
    }
}

fn glyph(provider_type: ProviderType) -> (MarkerShape, &'static str) {
    match provider_type {
        ProviderType::Hospital => (MarkerShape::Cross, "#e53935"),
        ProviderType::Clinic => (MarkerShape::Circle, "#1e88e5"),
        ProviderType::Doctor => (MarkerShape::Stethoscope, "#43a047"),
        ProviderType::Pharmacy => (MarkerShape::Capsule, "#00897b"),
        ProviderType::Lab => (MarkerShape::Flask, "#8e24aa"),
        ProviderType::RadiologyCenter => (MarkerShape::Scanner, "#5e35b1"),
        ProviderType::BloodCabin => (MarkerShape::Drop, "#c62828"),
        ProviderType::MedicalEquipment => (MarkerShape::Toolbox, "#6d4c41"),
        ProviderType::BirthHospital => (MarkerShape::Cradle, "#d81b60"),
    }
}

/// Compute the marker style for an entity in a mode.
///
/// Shape and color encode the type, size and border grow with selection,
/// and emergency-capable providers pulse in emergency mode.
pub fn marker_style(mode: MapMode, inputs: StyleInputs) -> MarkerStyle {
    let (shape, color) = glyph(inputs.provider_type);
    let (size_px, border_px) = if inputs.is_selected {
        (SELECTED_SIZE_PX, SELECTED_BORDER_PX)
    } else {
        (BASE_SIZE_PX, BASE_BORDER_PX)
    };

    MarkerStyle {
        shape,
        color,
        size_px,
        border_px,
        pulsing: mode == MapMode::Emergency && inputs.is_emergency_capable,
    }
}
