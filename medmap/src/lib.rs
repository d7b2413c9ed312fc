//! MedMap - interactive map synchronization for a health-care provider directory
//!
//! Keeps a clustered map of providers consistent with the data layer, the
//! user's filters, the user's position and the current selection, while
//! issuing as few draw calls as possible.
//!
//! # High-Level API
//!
//! [`engine::MapEngine`] is the facade; [`driver::EngineDriver`] runs it on a
//! tokio task against a [`provider::ProviderFeed`] and a
//! [`geolocation::Geolocator`].
//!
//! ```
//! use medmap::config::EngineConfig;
//! use medmap::engine::MapEngine;
//! use medmap::geo::Coordinates;
//! use medmap::mode::MapMode;
//! use medmap::provider::{ProviderEntity, ProviderSnapshot, ProviderType};
//! use medmap::render::{ContainerId, RecordingRenderer};
//!
//! let mut engine = MapEngine::new(RecordingRenderer::new(), EngineConfig::default());
//! engine.mount(ContainerId::new("map"));
//! engine.set_snapshot(
//!     MapMode::Providers,
//!     ProviderSnapshot::new(1, vec![ProviderEntity::new(
//!         "clinic-1",
//!         ProviderType::Clinic,
//!         Coordinates::new(35.20, -0.63),
//!     )]),
//! );
//! assert_eq!(engine.display_set().len(), 1);
//! ```

pub mod cluster;
pub mod config;
pub mod driver;
pub mod engine;
pub mod filter;
pub mod geo;
pub mod geolocation;
pub mod log;
pub mod logging;
pub mod marker;
pub mod mode;
pub mod provider;
pub mod render;
pub mod selection;
pub mod surface;

/// Version of the library and CLI, shared across the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
