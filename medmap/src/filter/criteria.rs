//! Filter criteria and their predicates.

use std::collections::BTreeSet;

use crate::mode::MapMode;
use crate::provider::{ProviderEntity, ProviderType};

/// The full set of user-controlled filters plus the active mode.
///
/// All predicates are ANDed. Empty criteria place no restriction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSet {
    /// Restricts the base collection before any predicate runs
    pub mode: MapMode,
    /// Case-insensitive substring searched in name, address, type and specialty
    pub query: String,
    /// Allowed provider types; empty means every type
    pub types: BTreeSet<ProviderType>,
    /// Only providers open right now
    pub open_now: bool,
}

impl FilterSet {
    pub fn new(mode: MapMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_types(mut self, types: impl IntoIterator<Item = ProviderType>) -> Self {
        self.types = types.into_iter().collect();
        self
    }

    pub fn with_open_now(mut self, open_now: bool) -> Self {
        self.open_now = open_now;
        self
    }

    pub fn with_mode(mut self, mode: MapMode) -> Self {
        self.mode = mode;
        self
    }

    /// True when no predicate besides the mode is active.
    pub fn is_unrestricted(&self) -> bool {
        self.query.trim().is_empty() && self.types.is_empty() && !self.open_now
    }

    /// Whether an entity belongs to the base collection of the mode.
    pub fn in_mode(&self, entity: &ProviderEntity) -> bool {
        match self.mode {
            MapMode::Providers => true,
            MapMode::Emergency => entity.is_emergency_capable,
            MapMode::Blood => entity.provider_type == ProviderType::BloodCabin,
        }
    }

    /// Evaluate mode restriction and every predicate.
    pub fn matches(&self, entity: &ProviderEntity) -> bool {
        self.matches_structured(entity) && matches_text(entity, &self.normalized_query())
    }

    /// Mode, type and open-now predicates (everything except free text).
    pub(super) fn matches_structured(&self, entity: &ProviderEntity) -> bool {
        self.in_mode(entity)
            && (self.types.is_empty() || self.types.contains(&entity.provider_type))
            && (!self.open_now || entity.is_open_now)
    }

    pub(super) fn normalized_query(&self) -> String {
        self.query.trim().to_lowercase()
    }
}

/// Free-text predicate. `needle` must already be trimmed and lowercased.
pub(super) fn matches_text(entity: &ProviderEntity, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let hit = |haystack: &str| haystack.to_lowercase().contains(needle);

    hit(&entity.display_name)
        || hit(&entity.address)
        || hit(entity.provider_type.as_str())
        || hit(&entity.provider_type.as_str().replace('_', " "))
        || entity.specialty.as_deref().is_some_and(hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinates;

    fn pharmacy() -> ProviderEntity {
        ProviderEntity::new("ph", ProviderType::Pharmacy, Coordinates::new(0.0, 0.0))
            .with_name("Pharmacie El Amel")
            .with_address("12 Rue Larbi Ben M'hidi")
            .open_now(true)
    }

    #[test]
    fn test_unrestricted_matches_everything() {
        let filters = FilterSet::default();
        assert!(filters.is_unrestricted());
        assert!(filters.matches(&pharmacy()));
    }

    #[test]
    fn test_query_is_case_insensitive() {
        assert!(FilterSet::default().with_query("el amel").matches(&pharmacy()));
        assert!(FilterSet::default().with_query("LARBI").matches(&pharmacy()));
        assert!(!FilterSet::default().with_query("cardio").matches(&pharmacy()));
    }

    #[test]
    fn test_query_matches_type_and_specialty() {
        let doctor = ProviderEntity::new("d", ProviderType::RadiologyCenter, Coordinates::new(0.0, 0.0))
            .with_specialty("Cardiologie");
        assert!(FilterSet::default().with_query("radiology center").matches(&doctor));
        assert!(FilterSet::default().with_query("radiology_center").matches(&doctor));
        assert!(FilterSet::default().with_query("cardio").matches(&doctor));
    }

    #[test]
    fn test_whitespace_query_is_ignored() {
        assert!(FilterSet::default().with_query("   ").matches(&pharmacy()));
    }

    #[test]
    fn test_types_and_open_now_are_anded() {
        let filters = FilterSet::default()
            .with_types([ProviderType::Pharmacy])
            .with_open_now(true);
        assert!(filters.matches(&pharmacy()));
        assert!(!filters.matches(&pharmacy().open_now(false)));
        assert!(!filters
            .clone()
            .with_types([ProviderType::Lab])
            .matches(&pharmacy()));
    }

    #[test]
    fn test_mode_restricts_base_collection() {
        let emergency = FilterSet::new(MapMode::Emergency);
        assert!(!emergency.matches(&pharmacy()));
        assert!(emergency.matches(&pharmacy().emergency(true)));

        let blood = FilterSet::new(MapMode::Blood);
        let cabin = ProviderEntity::new("b", ProviderType::BloodCabin, Coordinates::new(0.0, 0.0));
        assert!(blood.matches(&cabin));
        assert!(!blood.matches(&pharmacy()));
    }
}
