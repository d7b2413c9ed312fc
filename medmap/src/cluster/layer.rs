//! A clustered marker layer and its live marker index.

use std::sync::Arc;

use crate::log::Logger;
use crate::marker::{DisplayPass, MarkerIndex, MarkerReconciler, PassOutcome};
use crate::mode::MapMode;
use crate::render::{LayerId, MapRenderer};

/// The renderer layer registered for a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerHandle {
    pub mode: MapMode,
    pub layer: LayerId,
}

/// A clustering layer together with the markers drawn on it.
#[derive(Debug)]
pub struct ClusterLayer {
    handle: LayerHandle,
    reconciler: MarkerReconciler,
}

impl ClusterLayer {
    pub(super) fn new(handle: LayerHandle, logger: Arc<dyn Logger>) -> Self {
        Self {
            handle,
            reconciler: MarkerReconciler::new(handle.mode, logger),
        }
    }

    pub fn handle(&self) -> LayerHandle {
        self.handle
    }

    pub fn markers(&self) -> &MarkerIndex {
        self.reconciler.index()
    }

    pub fn reconciler(&self) -> &MarkerReconciler {
        &self.reconciler
    }

    pub fn last_generation(&self) -> Option<u64> {
        self.reconciler.last_generation()
    }

    pub fn run_pass<R: MapRenderer + ?Sized>(
        &mut self,
        pass: DisplayPass,
        renderer: &mut R,
    ) -> PassOutcome {
        self.reconciler.run_pass(pass, self.handle.layer, renderer)
    }

    pub fn restyle<R: MapRenderer + ?Sized>(
        &mut self,
        id: &str,
        is_selected: bool,
        renderer: &mut R,
    ) -> bool {
        self.reconciler
            .restyle(id, is_selected, self.handle.layer, renderer)
    }

    pub(super) fn clear<R: MapRenderer + ?Sized>(&mut self, renderer: &mut R) -> usize {
        self.reconciler.clear(self.handle.layer, renderer)
    }
}
