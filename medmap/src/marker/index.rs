//! Side table of live markers.
//!
//! Maps entity ids to the renderer handles drawn for them on one layer.
//! Only the reconciler mutates it.

use std::collections::HashMap;

use super::style::{MarkerStyle, StyleInputs};
use crate::geo::Coordinates;
use crate::render::MarkerHandle;

/// The renderer-side representation of one entity on a layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveMarker {
    pub handle: MarkerHandle,
    pub coordinates: Coordinates,
    pub inputs: StyleInputs,
    pub style: MarkerStyle,
}

/// Live markers of one layer, keyed by entity id.
#[derive(Debug, Default)]
pub struct MarkerIndex {
    markers: HashMap<String, LiveMarker>,
}

impl MarkerIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&LiveMarker> {
        self.markers.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.markers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Live ids in sorted order.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.markers.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LiveMarker)> {
        self.markers.iter().map(|(id, m)| (id.as_str(), m))
    }

    pub(super) fn insert(&mut self, id: String, marker: LiveMarker) {
        self.markers.insert(id, marker);
    }

    pub(super) fn get_mut(&mut self, id: &str) -> Option<&mut LiveMarker> {
        self.markers.get_mut(id)
    }

    pub(super) fn remove(&mut self, id: &str) -> Option<LiveMarker> {
        self.markers.remove(id)
    }

    pub(super) fn drain(&mut self) -> impl Iterator<Item = (String, LiveMarker)> + '_ {
        self.markers.drain()
    }
}
