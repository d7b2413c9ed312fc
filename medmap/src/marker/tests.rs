//! Tests for marker reconciliation and styling

use std::sync::Arc;

use proptest::prelude::*;

use super::*;
use crate::cluster::ClusterOptions;
use crate::geo::Coordinates;
use crate::log::{LogLevel, MemoryLogger, NoOpLogger};
use crate::mode::MapMode;
use crate::provider::{DisplayEntity, ProviderEntity, ProviderType};
use crate::render::{LayerId, MapRenderer, RecordingRenderer, RenderCall};

fn display(id: &str, lat: f64) -> DisplayEntity {
    DisplayEntity {
        entity: ProviderEntity::new(id, ProviderType::Clinic, Coordinates::new(lat, -0.63))
            .with_name(format!("Clinic {id}")),
        distance_km: None,
        is_selected: false,
    }
}

fn setup() -> (RecordingRenderer, LayerId, MarkerReconciler) {
    let mut renderer = RecordingRenderer::new();
    let layer = renderer.create_cluster_layer(&ClusterOptions::default());
    let reconciler = MarkerReconciler::new(MapMode::Providers, Arc::new(NoOpLogger));
    (renderer, layer, reconciler)
}

fn pass(generation: u64, entities: Vec<DisplayEntity>) -> DisplayPass {
    DisplayPass {
        generation,
        mode: MapMode::Providers,
        entities,
    }
}

fn is_add(call: &RenderCall) -> bool {
    matches!(call, RenderCall::AddMarker { .. })
}

fn is_remove(call: &RenderCall) -> bool {
    matches!(call, RenderCall::RemoveMarker { .. })
}

fn is_update(call: &RenderCall) -> bool {
    matches!(call, RenderCall::UpdateMarker { .. })
}

#[test]
fn test_initial_pass_adds_everything() {
    let (mut renderer, layer, mut reconciler) = setup();
    let outcome = reconciler.run_pass(
        pass(1, vec![display("a", 35.1), display("b", 35.2)]),
        layer,
        &mut renderer,
    );

    let report = outcome.report().unwrap();
    assert_eq!(report.added, 2);
    assert_eq!(reconciler.index().ids(), vec!["a", "b"]);
    assert_eq!(renderer.marker_ids(layer), vec!["a", "b"]);
}

#[test]
fn test_shifted_window_removes_one_adds_one_updates_two() {
    let (mut renderer, layer, mut reconciler) = setup();
    reconciler.run_pass(
        pass(1, vec![display("A", 35.1), display("B", 35.2), display("C", 35.3)]),
        layer,
        &mut renderer,
    );
    let handle_b = renderer.marker_handle(layer, "B");
    let handle_c = renderer.marker_handle(layer, "C");

    let next = vec![display("B", 35.2), display("C", 35.3), display("D", 35.4)];
    let plan = reconciler.plan(&next);
    assert_eq!(plan.to_remove, vec!["A"]);
    assert_eq!(plan.to_add.len(), 1);
    assert_eq!(plan.to_add[0].spec.id, "D");
    assert_eq!(plan.to_update.len(), 2);

    renderer.clear_calls();
    reconciler.run_pass(pass(2, next), layer, &mut renderer);

    assert_eq!(renderer.count(is_remove), 1);
    assert_eq!(renderer.count(is_add), 1);
    // B and C kept their markers
    assert_eq!(renderer.marker_handle(layer, "B"), handle_b);
    assert_eq!(renderer.marker_handle(layer, "C"), handle_c);
    assert_eq!(renderer.marker_ids(layer), vec!["B", "C", "D"]);
}

#[test]
fn test_unchanged_update_skips_draw_call() {
    let (mut renderer, layer, mut reconciler) = setup();
    let set = vec![display("a", 35.1)];
    reconciler.run_pass(pass(1, set.clone()), layer, &mut renderer);
    renderer.clear_calls();

    let outcome = reconciler.run_pass(pass(2, set), layer, &mut renderer);
    let report = outcome.report().unwrap();
    assert_eq!(report.unchanged, 1);
    assert_eq!(report.restyled, 0);
    assert!(renderer.calls().is_empty());
}

#[test]
fn test_moved_entity_is_updated_in_place() {
    let (mut renderer, layer, mut reconciler) = setup();
    reconciler.run_pass(pass(1, vec![display("a", 35.1)]), layer, &mut renderer);
    renderer.clear_calls();

    reconciler.run_pass(pass(2, vec![display("a", 35.15)]), layer, &mut renderer);
    assert_eq!(renderer.count(is_update), 1);
    assert_eq!(renderer.count(is_add), 0);
    assert_eq!(
        renderer.marker_position(layer, "a"),
        Some(Coordinates::new(35.15, -0.63))
    );
}

#[test]
fn test_invalid_coordinates_skipped_and_logged() {
    let mut renderer = RecordingRenderer::new();
    let layer = renderer.create_cluster_layer(&ClusterOptions::default());
    let logger = Arc::new(MemoryLogger::new());
    let mut reconciler = MarkerReconciler::new(MapMode::Providers, logger.clone());

    let mut bad = display("bad", 35.0);
    bad.entity.coordinates = Coordinates::new(f64::NAN, 0.0);
    let outcome = reconciler.run_pass(pass(1, vec![display("ok", 35.1), bad]), layer, &mut renderer);

    let report = outcome.report().unwrap();
    assert_eq!(report.added, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].id, "bad");
    assert!(matches!(report.skipped[0].reason, SkipReason::InvalidCoordinates(_)));
    assert_eq!(logger.lines_at(LogLevel::Warn).len(), 1);
    assert!(logger.contains("bad"));
}

#[test]
fn test_entity_turning_invalid_loses_marker() {
    let (mut renderer, layer, mut reconciler) = setup();
    reconciler.run_pass(pass(1, vec![display("a", 35.1)]), layer, &mut renderer);

    let mut broken = display("a", 35.1);
    broken.entity.coordinates = Coordinates::new(f64::NAN, 0.0);
    reconciler.run_pass(pass(2, vec![broken]), layer, &mut renderer);

    assert!(reconciler.index().is_empty());
    assert!(renderer.marker_ids(layer).is_empty());
}

#[test]
fn test_out_of_range_coordinates_drawn_clamped() {
    let (mut renderer, layer, mut reconciler) = setup();
    let mut edge = display("edge", 35.0);
    edge.entity.coordinates = Coordinates::new(35.0, 180.2);

    let outcome = reconciler.run_pass(pass(1, vec![edge]), layer, &mut renderer);

    let report = outcome.report().unwrap();
    assert_eq!(report.added, 1);
    assert!(report.skipped.is_empty());
    assert_eq!(renderer.marker_ids(layer), vec!["edge"]);
    assert_eq!(
        renderer.marker_position(layer, "edge"),
        Some(Coordinates::new(35.0, 180.0))
    );
}

#[test]
fn test_duplicate_id_first_wins() {
    let (mut renderer, layer, mut reconciler) = setup();
    let outcome = reconciler.run_pass(
        pass(1, vec![display("a", 35.1), display("a", 35.9)]),
        layer,
        &mut renderer,
    );

    let report = outcome.report().unwrap();
    assert_eq!(report.added, 1);
    assert_eq!(report.skipped[0].reason, SkipReason::DuplicateId);
    assert_eq!(
        renderer.marker_position(layer, "a"),
        Some(Coordinates::new(35.1, -0.63))
    );
}

#[test]
fn test_renderer_rejection_is_not_fatal() {
    let (mut renderer, layer, mut reconciler) = setup();
    renderer.reject_marker("b");
    let outcome = reconciler.run_pass(
        pass(1, vec![display("a", 35.1), display("b", 35.2), display("c", 35.3)]),
        layer,
        &mut renderer,
    );

    let report = outcome.report().unwrap();
    assert_eq!(report.added, 2);
    assert!(matches!(
        report.skipped[0].reason,
        SkipReason::RendererRejected(_)
    ));
    assert_eq!(reconciler.index().ids(), vec!["a", "c"]);
}

#[test]
fn test_stale_pass_is_discarded() {
    let (mut renderer, layer, mut reconciler) = setup();
    reconciler.run_pass(pass(5, vec![display("new", 35.1)]), layer, &mut renderer);
    renderer.clear_calls();

    let outcome = reconciler.run_pass(pass(4, vec![display("old", 35.1)]), layer, &mut renderer);
    assert_eq!(
        outcome,
        PassOutcome::Stale {
            generation: 4,
            last_applied: 5
        }
    );
    assert!(renderer.calls().is_empty());
    assert_eq!(reconciler.index().ids(), vec!["new"]);
}

#[test]
fn test_restyle_touches_one_marker() {
    let (mut renderer, layer, mut reconciler) = setup();
    reconciler.run_pass(
        pass(1, vec![display("a", 35.1), display("b", 35.2)]),
        layer,
        &mut renderer,
    );
    renderer.clear_calls();

    assert!(reconciler.restyle("a", true, layer, &mut renderer));
    assert_eq!(renderer.count(is_update), 1);
    assert_eq!(
        renderer.marker_style(layer, "a").map(|s| s.size_px),
        Some(SELECTED_SIZE_PX)
    );
    assert!(reconciler.previous()[0].is_selected);
    assert!(!reconciler.restyle("missing", true, layer, &mut renderer));
}

#[test]
fn test_restyle_then_identical_pass_is_quiet() {
    let (mut renderer, layer, mut reconciler) = setup();
    reconciler.run_pass(pass(1, vec![display("a", 35.1)]), layer, &mut renderer);
    reconciler.restyle("a", true, layer, &mut renderer);
    renderer.clear_calls();

    let mut selected = display("a", 35.1);
    selected.is_selected = true;
    reconciler.run_pass(pass(2, vec![selected]), layer, &mut renderer);
    assert!(renderer.calls().is_empty());
}

#[test]
fn test_clear_removes_all_markers() {
    let (mut renderer, layer, mut reconciler) = setup();
    reconciler.run_pass(
        pass(1, vec![display("a", 35.1), display("b", 35.2)]),
        layer,
        &mut renderer,
    );
    assert_eq!(reconciler.clear(layer, &mut renderer), 2);
    assert!(renderer.marker_ids(layer).is_empty());
    assert!(reconciler.previous().is_empty());
    assert_eq!(reconciler.last_generation(), Some(1));
}

#[test]
fn test_plan_is_noop_for_identical_set() {
    let (mut renderer, layer, mut reconciler) = setup();
    let set = vec![display("a", 35.1), display("b", 35.2)];
    reconciler.run_pass(pass(1, set.clone()), layer, &mut renderer);
    assert!(reconciler.plan(&set).is_noop());
}

fn arb_pass() -> impl Strategy<Value = Vec<DisplayEntity>> {
    prop::collection::vec((0u8..12, any::<bool>(), 0u8..10), 0..12).prop_map(|rows| {
        rows.into_iter()
            .map(|(id, selected, lat)| {
                let mut d = display(&format!("p{id}"), 35.0 + f64::from(lat) / 100.0);
                d.is_selected = selected;
                if lat == 9 {
                    d.entity.coordinates = Coordinates::new(f64::INFINITY, 0.0);
                }
                d
            })
            .collect()
    })
}

fn renderable_ids(set: &[DisplayEntity]) -> Vec<String> {
    let mut ids: Vec<String> = set
        .iter()
        .filter(|d| d.coordinates().is_finite())
        .map(|d| d.id().to_string())
        .collect();
    ids.sort();
    ids.dedup();
    ids
}

proptest! {
    #[test]
    fn prop_live_ids_track_display_ids(passes in prop::collection::vec(arb_pass(), 50..60)) {
        let (mut renderer, layer, mut reconciler) = setup();
        for (i, set) in passes.into_iter().enumerate() {
            let expected = renderable_ids(&set);
            reconciler.run_pass(pass(i as u64 + 1, set), layer, &mut renderer);
            prop_assert_eq!(reconciler.index().ids(), expected.clone());
            prop_assert_eq!(renderer.marker_ids(layer), expected);
        }
    }

    #[test]
    fn prop_plan_is_deterministic(previous in arb_pass(), next in arb_pass()) {
        let (mut renderer, layer, mut reconciler) = setup();
        reconciler.run_pass(pass(1, previous), layer, &mut renderer);
        prop_assert_eq!(reconciler.plan(&next), reconciler.plan(&next));
    }
}
