//! Provider entity types

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::geo::Coordinates;

/// Category of a health-care provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderType {
    Hospital,
    Clinic,
    Doctor,
    Pharmacy,
    Lab,
    RadiologyCenter,
    BloodCabin,
    MedicalEquipment,
    BirthHospital,
}

impl ProviderType {
    /// All provider types in canonical order.
    pub const ALL: [ProviderType; 9] = [
        ProviderType::Hospital,
        ProviderType::Clinic,
        ProviderType::Doctor,
        ProviderType::Pharmacy,
        ProviderType::Lab,
        ProviderType::RadiologyCenter,
        ProviderType::BloodCabin,
        ProviderType::MedicalEquipment,
        ProviderType::BirthHospital,
    ];

    /// Stable key used in query strings, JSON and config.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::Hospital => "hospital",
            ProviderType::Clinic => "clinic",
            ProviderType::Doctor => "doctor",
            ProviderType::Pharmacy => "pharmacy",
            ProviderType::Lab => "lab",
            ProviderType::RadiologyCenter => "radiology_center",
            ProviderType::BloodCabin => "blood_cabin",
            ProviderType::MedicalEquipment => "medical_equipment",
            ProviderType::BirthHospital => "birth_hospital",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        ProviderType::ALL
            .into_iter()
            .find(|t| t.as_str() == key)
            .ok_or_else(|| format!("unknown provider type '{}'", s))
    }
}

/// One health-care facility or practitioner, as delivered by the data layer.
///
/// Treated as immutable input for the duration of a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProviderEntity {
    /// Stable unique identifier
    pub id: String,
    /// Provider category
    #[serde(rename = "type")]
    pub provider_type: ProviderType,
    /// Location of the facility
    pub coordinates: Coordinates,
    /// Computed upstream from the opening schedule
    #[serde(default)]
    pub is_open_now: bool,
    /// Accepts emergencies
    #[serde(default)]
    pub is_emergency_capable: bool,
    pub display_name: String,
    #[serde(default)]
    pub address: String,
    /// Free-text specialty (doctors, clinics)
    #[serde(default)]
    pub specialty: Option<String>,
}

impl ProviderEntity {
    /// Create an entity named after its id, with an empty address and all
    /// flags off.
    pub fn new(id: impl Into<String>, provider_type: ProviderType, coordinates: Coordinates) -> Self {
        let id = id.into();
        Self {
            display_name: id.clone(),
            id,
            provider_type,
            coordinates,
            is_open_now: false,
            is_emergency_capable: false,
            address: String::new(),
            specialty: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = Some(specialty.into());
        self
    }

    pub fn open_now(mut self, open: bool) -> Self {
        self.is_open_now = open;
        self
    }

    pub fn emergency(mut self, capable: bool) -> Self {
        self.is_emergency_capable = capable;
        self
    }
}

/// A provider annotated for display: distance to the user and selection flag.
///
/// Recomputed whenever filters, geolocation or the snapshot change.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayEntity {
    pub entity: ProviderEntity,
    /// Kilometers from the user; `None` when the user position is unknown
    pub distance_km: Option<f64>,
    pub is_selected: bool,
}

impl DisplayEntity {
    #[inline]
    pub fn id(&self) -> &str {
        &self.entity.id
    }

    #[inline]
    pub fn coordinates(&self) -> Coordinates {
        self.entity.coordinates
    }
}
