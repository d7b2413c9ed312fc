//! UI events, data status and pass outcomes.

use std::fmt;

use crate::marker::ApplyReport;
use crate::render::Viewport;

/// Input reported by the renderer or the host UI.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// The user clicked the marker of an entity
    MarkerClicked(String),
    /// The user panned or zoomed
    ViewportChanged(Viewport),
    /// The container's size changed
    ContainerResized,
    /// A camera animation finished
    CameraSettled { sequence: u64 },
}

/// Data-layer status of the active mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DataStatus {
    #[default]
    Loading,
    Ready,
    /// Fetching failed; markers from the last snapshot stay on the map
    Failed { message: String },
}

impl DataStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, DataStatus::Failed { .. })
    }
}

impl fmt::Display for DataStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataStatus::Loading => f.write_str("loading"),
            DataStatus::Ready => f.write_str("ready"),
            DataStatus::Failed { message } => write!(f, "failed: {message}"),
        }
    }
}

/// Why a pass did not reach the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// A newer pass was already applied
    Superseded { last_applied: u64 },
    /// The pass was computed for a mode that is no longer active
    ModeInactive,
    /// No surface yet; the display set was kept for list views
    SurfaceNotReady,
}

/// Result of [`MapEngine::apply_pass`](super::MapEngine::apply_pass).
#[derive(Debug, Clone, PartialEq)]
pub enum PassResult {
    Applied(ApplyReport),
    Discarded {
        generation: u64,
        reason: DiscardReason,
    },
}

impl PassResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, PassResult::Applied(_))
    }

    pub fn report(&self) -> Option<&ApplyReport> {
        match self {
            PassResult::Applied(report) => Some(report),
            PassResult::Discarded { .. } => None,
        }
    }
}
