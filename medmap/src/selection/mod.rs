//! Provider selection and the camera move that follows it.
//!
//! The controller only decides what changes. The engine applies a
//! [`SelectionChange`] by re-styling the two affected markers and, when a
//! target is given, flying the camera there.

mod controller;

pub use controller::{CameraConfig, SelectionChange, SelectionController, SelectionState};
