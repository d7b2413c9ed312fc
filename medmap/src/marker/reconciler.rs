//! Per-layer reconciliation state.

use std::sync::Arc;

use super::index::MarkerIndex;
use super::reconcile::{apply_plan, clear_markers, reconcile, restyle_marker, ApplyReport, ReconcilePlan};
use crate::log::Logger;
use crate::mode::MapMode;
use crate::provider::DisplayEntity;
use crate::render::{LayerId, MapRenderer};
use crate::{log_debug, log_warn};

/// One display set computed for a mode, tagged with its generation.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayPass {
    pub generation: u64,
    pub mode: MapMode,
    pub entities: Vec<DisplayEntity>,
}

/// Result of offering a pass to a reconciler.
#[derive(Debug, Clone, PartialEq)]
pub enum PassOutcome {
    Applied(ApplyReport),
    /// The pass was not newer than the last applied one and was dropped
    Stale { generation: u64, last_applied: u64 },
}

impl PassOutcome {
    pub fn report(&self) -> Option<&ApplyReport> {
        match self {
            PassOutcome::Applied(report) => Some(report),
            PassOutcome::Stale { .. } => None,
        }
    }
}

/// Live markers, previous display set and last applied generation of one
/// cluster layer.
pub struct MarkerReconciler {
    mode: MapMode,
    index: MarkerIndex,
    previous: Vec<DisplayEntity>,
    last_generation: Option<u64>,
    logger: Arc<dyn Logger>,
}

impl MarkerReconciler {
    pub fn new(mode: MapMode, logger: Arc<dyn Logger>) -> Self {
        Self {
            mode,
            index: MarkerIndex::new(),
            previous: Vec::new(),
            last_generation: None,
            logger,
        }
    }

    pub fn mode(&self) -> MapMode {
        self.mode
    }

    pub fn index(&self) -> &MarkerIndex {
        &self.index
    }

    /// The display set of the last applied pass.
    pub fn previous(&self) -> &[DisplayEntity] {
        &self.previous
    }

    pub fn last_generation(&self) -> Option<u64> {
        self.last_generation
    }

    /// Plan a pass without touching the renderer.
    pub fn plan(&self, next: &[DisplayEntity]) -> ReconcilePlan {
        reconcile(self.mode, &self.previous, next, &self.index)
    }

    /// Reconcile the layer with a pass unless a newer one was already applied.
    pub fn run_pass<R: MapRenderer + ?Sized>(
        &mut self,
        pass: DisplayPass,
        layer: LayerId,
        renderer: &mut R,
    ) -> PassOutcome {
        if let Some(last_applied) = self.last_generation {
            if pass.generation <= last_applied {
                log_debug!(
                    self.logger,
                    "discarding pass {} for {} (last applied {})",
                    pass.generation,
                    self.mode,
                    last_applied
                );
                return PassOutcome::Stale {
                    generation: pass.generation,
                    last_applied,
                };
            }
        }

        let plan = self.plan(&pass.entities);
        let report = apply_plan(plan, layer, &mut self.index, renderer);
        for skipped in &report.skipped {
            log_warn!(self.logger, "no marker for {}", skipped);
        }
        log_debug!(
            self.logger,
            "pass {} for {}: +{} ~{} ={} -{}",
            pass.generation,
            self.mode,
            report.added,
            report.restyled,
            report.unchanged,
            report.removed
        );

        self.previous = pass.entities;
        self.last_generation = Some(pass.generation);
        PassOutcome::Applied(report)
    }

    /// Flip one marker's selection flag and redraw only that marker.
    pub fn restyle<R: MapRenderer + ?Sized>(
        &mut self,
        id: &str,
        is_selected: bool,
        layer: LayerId,
        renderer: &mut R,
    ) -> bool {
        if let Some(entry) = self.previous.iter_mut().find(|d| d.id() == id) {
            entry.is_selected = is_selected;
        }
        restyle_marker(self.mode, id, is_selected, layer, &mut self.index, renderer)
    }

    /// Remove every marker. The generation counter is kept.
    pub fn clear<R: MapRenderer + ?Sized>(&mut self, layer: LayerId, renderer: &mut R) -> usize {
        self.previous.clear();
        clear_markers(layer, &mut self.index, renderer)
    }
}

impl std::fmt::Debug for MarkerReconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkerReconciler")
            .field("mode", &self.mode)
            .field("live", &self.index.len())
            .field("last_generation", &self.last_generation)
            .finish()
    }
}
