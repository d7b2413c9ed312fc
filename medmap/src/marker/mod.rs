//! Marker reconciliation.
//!
//! Keeps the markers drawn on a cluster layer in sync with the display set
//! using the smallest set of add, update and remove calls. A marker is
//! never recreated while its entity stays in the set: style and position
//! changes are applied in place.
//!
//! After every applied pass the ids in the [`MarkerIndex`] equal the ids
//! of the pass's entities that have valid coordinates (first occurrence
//! of each id).

mod index;
mod reconcile;
mod reconciler;
mod style;

#[cfg(test)]
mod tests;

pub use index::{LiveMarker, MarkerIndex};
pub use reconcile::{
    apply_plan, reconcile, restyle_marker, ApplyReport, MarkerSpec, MarkerUpdate, PlannedMarker,
    ReconcilePlan, SkipReason, SkippedEntity,
};
pub use reconciler::{DisplayPass, MarkerReconciler, PassOutcome};
pub use style::{
    marker_style, MarkerShape, MarkerStyle, StyleInputs, BASE_BORDER_PX, BASE_SIZE_PX,
    SELECTED_BORDER_PX, SELECTED_SIZE_PX,
};
