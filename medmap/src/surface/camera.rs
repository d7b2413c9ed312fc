//! Camera animation bookkeeping.

use std::time::Duration;

use crate::geo::Coordinates;

/// A requested camera move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRequest {
    pub target: Coordinates,
    pub zoom: f64,
    pub duration: Duration,
}

/// The camera animation the renderer is currently running.
///
/// Each request gets a sequence number. A newer request replaces the one in
/// flight; completions reported for an older sequence are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraAnimation {
    pub sequence: u64,
    pub request: CameraRequest,
    /// Sequence of the animation this one interrupted, if any
    pub superseded: Option<u64>,
}
