//! Display set computation.

use crate::geo::{compare_distance, distance_km, Coordinates};
use crate::provider::{DisplayEntity, ProviderEntity};

use super::criteria::{matches_text, FilterSet};

/// Compute the ordered display set for the current inputs.
///
/// Pure and deterministic: identical arguments always produce identical
/// output, which keeps marker diffs stable between passes.
///
/// Entities are filtered by mode and predicates, annotated with their
/// distance to `user_position`, and sorted by ascending distance. Unknown
/// distances sort last; ties keep input order. With no user position the
/// input order is preserved as-is.
///
/// # Example
///
/// ```
/// use medmap::filter::{compute_display_set, FilterSet};
/// use medmap::geo::Coordinates;
/// use medmap::provider::{ProviderEntity, ProviderType};
///
/// let entities = vec![
///     ProviderEntity::new("far", ProviderType::Clinic, Coordinates::new(35.30, -0.63)),
///     ProviderEntity::new("near", ProviderType::Clinic, Coordinates::new(35.20, -0.63)),
/// ];
/// let user = Some(Coordinates::new(35.1975, -0.63));
/// let display = compute_display_set(&entities, &FilterSet::default(), user, Some("near"));
///
/// assert_eq!(display[0].id(), "near");
/// assert!(display[0].is_selected);
/// ```
pub fn compute_display_set(
    entities: &[ProviderEntity],
    filters: &FilterSet,
    user_position: Option<Coordinates>,
    selected_id: Option<&str>,
) -> Vec<DisplayEntity> {
    let needle = filters.normalized_query();

    let mut display: Vec<DisplayEntity> = entities
        .iter()
        .filter(|entity| filters.matches_structured(entity) && matches_text(entity, &needle))
        .map(|entity| DisplayEntity {
            distance_km: distance_km(entity.coordinates, user_position),
            is_selected: selected_id == Some(entity.id.as_str()),
            entity: entity.clone(),
        })
        .collect();

    if user_position.is_some() {
        // sort_by is stable, so equal distances keep input order
        display.sort_by(|a, b| compare_distance(a.distance_km, b.distance_km));
    }

    display
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::MapMode;
    use crate::provider::ProviderType;
    use proptest::prelude::*;

    const USER: Coordinates = Coordinates::new(35.1975, -0.6300);

    fn at(id: &str, t: ProviderType, lat: f64) -> ProviderEntity {
        ProviderEntity::new(id, t, Coordinates::new(lat, -0.63))
    }

    fn ids(display: &[DisplayEntity]) -> Vec<&str> {
        display.iter().map(|d| d.id()).collect()
    }

    #[test]
    fn test_pharmacy_filter_keeps_two_of_five() {
        let entities = vec![
            at("h1", ProviderType::Hospital, 35.20),
            at("p1", ProviderType::Pharmacy, 35.21),
            at("c1", ProviderType::Clinic, 35.22),
            at("p2", ProviderType::Pharmacy, 35.23),
            at("l1", ProviderType::Lab, 35.24),
        ];
        let filters = FilterSet::default().with_types([ProviderType::Pharmacy]);
        let display = compute_display_set(&entities, &filters, Some(USER), None);

        assert_eq!(display.len(), 2);
        assert!(display
            .iter()
            .all(|d| d.entity.provider_type == ProviderType::Pharmacy));
    }

    #[test]
    fn test_sorted_by_distance() {
        let entities = vec![
            at("far", ProviderType::Clinic, 35.40),
            at("mid", ProviderType::Clinic, 35.30),
            at("near", ProviderType::Clinic, 35.20),
        ];
        let display = compute_display_set(&entities, &FilterSet::default(), Some(USER), None);
        assert_eq!(ids(&display), vec!["near", "mid", "far"]);
    }

    #[test]
    fn test_unknown_position_preserves_input_order() {
        let entities = vec![
            at("far", ProviderType::Clinic, 35.40),
            at("near", ProviderType::Clinic, 35.20),
        ];
        let display = compute_display_set(&entities, &FilterSet::default(), None, None);
        assert_eq!(ids(&display), vec!["far", "near"]);
        assert!(display.iter().all(|d| d.distance_km.is_none()));
    }

    #[test]
    fn test_unknown_distance_sorts_last() {
        let mut broken = at("broken", ProviderType::Clinic, 0.0);
        broken.coordinates = Coordinates::new(f64::NAN, f64::NAN);
        let entities = vec![broken, at("ok", ProviderType::Clinic, 36.0)];

        let display = compute_display_set(&entities, &FilterSet::default(), Some(USER), None);
        assert_eq!(ids(&display), vec!["ok", "broken"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let entities = vec![
            at("b", ProviderType::Clinic, 35.30),
            at("a", ProviderType::Lab, 35.30),
        ];
        let display = compute_display_set(&entities, &FilterSet::default(), Some(USER), None);
        assert_eq!(ids(&display), vec!["b", "a"]);
    }

    #[test]
    fn test_selected_flag() {
        let entities = vec![
            at("a", ProviderType::Clinic, 35.30),
            at("b", ProviderType::Clinic, 35.31),
        ];
        let display = compute_display_set(&entities, &FilterSet::default(), None, Some("b"));
        assert!(!display[0].is_selected);
        assert!(display[1].is_selected);
    }

    #[test]
    fn test_emergency_mode() {
        let entities = vec![
            at("a", ProviderType::Hospital, 35.30).emergency(true),
            at("b", ProviderType::Clinic, 35.31),
        ];
        let display =
            compute_display_set(&entities, &FilterSet::new(MapMode::Emergency), None, None);
        assert_eq!(ids(&display), vec!["a"]);
    }

    fn arb_entity() -> impl Strategy<Value = ProviderEntity> {
        (
            0usize..ProviderType::ALL.len(),
            -80.0f64..80.0,
            -170.0f64..170.0,
            any::<bool>(),
            any::<bool>(),
            "[a-z]{0,6}",
        )
            .prop_map(|(t, lat, lon, open, emergency, name)| {
                ProviderEntity::new(
                    format!("{}-{:.4}-{:.4}", name, lat, lon),
                    ProviderType::ALL[t],
                    Coordinates::new(lat, lon),
                )
                .with_name(name)
                .open_now(open)
                .emergency(emergency)
            })
    }

    fn arb_filters() -> impl Strategy<Value = FilterSet> {
        (
            0usize..3,
            "[a-z]{0,2}",
            proptest::collection::btree_set(0usize..ProviderType::ALL.len(), 0..3),
            any::<bool>(),
        )
            .prop_map(|(m, q, types, open)| {
                FilterSet::new(MapMode::ALL[m])
                    .with_query(q)
                    .with_types(types.into_iter().map(|i| ProviderType::ALL[i]))
                    .with_open_now(open)
            })
    }

    proptest! {
        /// Property: identical inputs produce identical output.
        #[test]
        fn prop_deterministic(
            entities in proptest::collection::vec(arb_entity(), 0..40),
            filters in arb_filters(),
            user in proptest::option::of((-80.0f64..80.0, -170.0f64..170.0)),
        ) {
            let user = user.map(|(lat, lon)| Coordinates::new(lat, lon));
            let first = compute_display_set(&entities, &filters, user, None);
            let second = compute_display_set(&entities, &filters, user, None);
            prop_assert_eq!(first, second);
        }

        /// Property: distances are non-decreasing with unknowns strictly last.
        #[test]
        fn prop_distance_monotonic(
            entities in proptest::collection::vec(arb_entity(), 0..40),
            lat in -80.0f64..80.0,
            lon in -170.0f64..170.0,
        ) {
            let display = compute_display_set(&entities, &FilterSet::default(), Some(Coordinates::new(lat, lon)), None);
            let mut seen_unknown = false;
            let mut last = 0.0f64;
            for entry in &display {
                match entry.distance_km {
                    Some(d) => {
                        prop_assert!(!seen_unknown, "known distance after unknown");
                        prop_assert!(d >= last);
                        last = d;
                    }
                    None => seen_unknown = true,
                }
            }
        }

        /// Property: every output entry satisfies the filters.
        #[test]
        fn prop_output_matches_filters(
            entities in proptest::collection::vec(arb_entity(), 0..40),
            filters in arb_filters(),
        ) {
            let display = compute_display_set(&entities, &filters, None, None);
            for entry in &display {
                prop_assert!(filters.matches(&entry.entity));
            }
            let expected = entities.iter().filter(|e| filters.matches(e)).count();
            prop_assert_eq!(display.len(), expected);
        }
    }
}
