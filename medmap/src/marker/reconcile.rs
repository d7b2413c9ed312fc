//! Diffing a new display set against the live markers of a layer.
//!
//! Planning is pure: [`reconcile`] only reads the previous display set and
//! the marker index. [`apply_plan`] then performs the draw calls and is the
//! only place the index changes during a pass.

use std::collections::HashSet;

use super::index::{LiveMarker, MarkerIndex};
use super::style::{marker_style, MarkerStyle, StyleInputs};
use crate::geo::Coordinates;
use crate::mode::MapMode;
use crate::provider::DisplayEntity;
use crate::render::{LayerId, MapRenderer, RenderError};

/// A marker to create.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    /// Entity id; the renderer reports clicks with it
    pub id: String,
    /// Tooltip text
    pub title: String,
    pub coordinates: Coordinates,
    pub style: MarkerStyle,
}

/// A creation planned for a pass, with the inputs its style came from.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedMarker {
    pub spec: MarkerSpec,
    pub inputs: StyleInputs,
}

/// A style-only update of an existing marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerUpdate {
    pub id: String,
    pub coordinates: Coordinates,
    pub inputs: StyleInputs,
    pub style: MarkerStyle,
    /// False when style and position equal what is already drawn
    pub changed: bool,
}

/// Why an entity got no marker in a pass.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// NaN or infinite coordinates
    InvalidCoordinates(Coordinates),
    /// The id already appeared earlier in the same display set
    DuplicateId,
    /// The renderer refused to draw it
    RendererRejected(RenderError),
}

/// Non-fatal per-entity failure collected during a pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntity {
    pub id: String,
    pub reason: SkipReason,
}

impl std::fmt::Display for SkippedEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            SkipReason::InvalidCoordinates(c) => {
                write!(f, "{}: invalid coordinates {}", self.id, c)
            }
            SkipReason::DuplicateId => write!(f, "{}: duplicate id", self.id),
            SkipReason::RendererRejected(e) => write!(f, "{}: {}", self.id, e),
        }
    }
}

/// The minimal set of marker operations for one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcilePlan {
    pub to_add: Vec<PlannedMarker>,
    pub to_update: Vec<MarkerUpdate>,
    /// Entity ids whose markers must go
    pub to_remove: Vec<String>,
    pub skipped: Vec<SkippedEntity>,
}

impl ReconcilePlan {
    pub fn is_noop(&self) -> bool {
        self.to_add.is_empty()
            && self.to_remove.is_empty()
            && self.to_update.iter().all(|u| !u.changed)
    }
}

/// Counts of what a pass actually did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplyReport {
    pub added: usize,
    /// Updates that reached the renderer
    pub restyled: usize,
    /// Updates skipped because nothing visible changed
    pub unchanged: usize,
    pub removed: usize,
    pub skipped: Vec<SkippedEntity>,
}

/// Plan the marker operations that bring `live` in sync with `next`.
///
/// Runs in O(|next| + |live|). Every entity of `next` with finite
/// coordinates is either created (no live marker) or updated in place
/// (live marker exists); live markers whose id left the set are removed.
/// Out-of-range coordinates are drawn clamped to the valid range.
/// Removals are listed in `previous` display order so plans are
/// deterministic regardless of index iteration order.
pub fn reconcile(
    mode: MapMode,
    previous: &[DisplayEntity],
    next: &[DisplayEntity],
    live: &MarkerIndex,
) -> ReconcilePlan {
    let mut plan = ReconcilePlan::default();
    let mut keep: HashSet<&str> = HashSet::with_capacity(next.len());

    for display in next {
        let id = display.id();
        let raw = display.coordinates();

        if keep.contains(id) {
            plan.skipped.push(SkippedEntity {
                id: id.to_string(),
                reason: SkipReason::DuplicateId,
            });
            continue;
        }
        if !raw.is_finite() {
            // Not kept: a marker drawn in an earlier pass is removed below
            plan.skipped.push(SkippedEntity {
                id: id.to_string(),
                reason: SkipReason::InvalidCoordinates(raw),
            });
            continue;
        }
        keep.insert(id);
        let coordinates = raw.clamped();

        let inputs = StyleInputs::of(display);
        let style = marker_style(mode, inputs);
        match live.get(id) {
            Some(marker) => plan.to_update.push(MarkerUpdate {
                id: id.to_string(),
                coordinates,
                inputs,
                style,
                changed: marker.style != style || marker.coordinates != coordinates,
            }),
            None => plan.to_add.push(PlannedMarker {
                spec: MarkerSpec {
                    id: id.to_string(),
                    title: display.entity.display_name.clone(),
                    coordinates,
                    style,
                },
                inputs,
            }),
        }
    }

    let mut removed: HashSet<&str> = HashSet::new();
    for display in previous {
        let id = display.id();
        if live.contains(id) && !keep.contains(id) && removed.insert(id) {
            plan.to_remove.push(id.to_string());
        }
    }
    // Markers the previous set does not explain (e.g. after a mode switch)
    let mut stragglers: Vec<String> = live
        .iter()
        .map(|(id, _)| id)
        .filter(|id| !keep.contains(id) && !removed.contains(id))
        .map(str::to_string)
        .collect();
    stragglers.sort();
    plan.to_remove.extend(stragglers);

    plan
}

/// Perform a plan's draw calls on a layer and update the index.
///
/// Removals run first, then in-place updates, then creations. A creation
/// the renderer rejects is reported in the returned report and the pass
/// continues.
pub fn apply_plan<R: MapRenderer + ?Sized>(
    plan: ReconcilePlan,
    layer: LayerId,
    index: &mut MarkerIndex,
    renderer: &mut R,
) -> ApplyReport {
    let mut report = ApplyReport {
        skipped: plan.skipped,
        ..ApplyReport::default()
    };

    for id in &plan.to_remove {
        if let Some(marker) = index.remove(id) {
            renderer.remove_marker(layer, marker.handle);
            report.removed += 1;
        }
    }

    for update in plan.to_update {
        let Some(marker) = index.get_mut(&update.id) else {
            continue;
        };
        marker.inputs = update.inputs;
        if update.changed {
            renderer.update_marker(layer, marker.handle, update.coordinates, &update.style);
            marker.coordinates = update.coordinates;
            marker.style = update.style;
            report.restyled += 1;
        } else {
            report.unchanged += 1;
        }
    }

    for PlannedMarker { spec, inputs } in plan.to_add {
        match renderer.add_marker(layer, &spec) {
            Ok(handle) => {
                index.insert(
                    spec.id,
                    LiveMarker {
                        handle,
                        coordinates: spec.coordinates,
                        inputs,
                        style: spec.style,
                    },
                );
                report.added += 1;
            }
            Err(error) => report.skipped.push(SkippedEntity {
                id: spec.id,
                reason: SkipReason::RendererRejected(error),
            }),
        }
    }

    report
}

/// Re-derive one marker's style after its selection flag changed.
///
/// Returns false if the id has no live marker on this layer.
pub fn restyle_marker<R: MapRenderer + ?Sized>(
    mode: MapMode,
    id: &str,
    is_selected: bool,
    layer: LayerId,
    index: &mut MarkerIndex,
    renderer: &mut R,
) -> bool {
    let Some(marker) = index.get_mut(id) else {
        return false;
    };
    let inputs = marker.inputs.with_selected(is_selected);
    let style = marker_style(mode, inputs);
    renderer.update_marker(layer, marker.handle, marker.coordinates, &style);
    marker.inputs = inputs;
    marker.style = style;
    true
}

/// Remove every marker of a layer.
pub fn clear_markers<R: MapRenderer + ?Sized>(
    layer: LayerId,
    index: &mut MarkerIndex,
    renderer: &mut R,
) -> usize {
    let mut removed = 0;
    for (_, marker) in index.drain() {
        renderer.remove_marker(layer, marker.handle);
        removed += 1;
    }
    removed
}
