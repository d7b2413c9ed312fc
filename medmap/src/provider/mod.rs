//! Health-care provider data model and the data-layer boundary.
//!
//! The data store itself is external. This module defines what the engine
//! consumes from it:
//!
//! - [`ProviderEntity`] / [`ProviderType`] - one facility as delivered upstream
//! - [`DisplayEntity`] - a provider annotated with distance and selection
//! - [`ProviderFeed`] - wholesale snapshot subscription per map mode
//!
//! ```
//! use medmap::geo::Coordinates;
//! use medmap::mode::MapMode;
//! use medmap::provider::{FeedState, InMemoryProviderFeed, ProviderEntity, ProviderFeed, ProviderType};
//!
//! let feed = InMemoryProviderFeed::new();
//! let rx = feed.subscribe(MapMode::Providers);
//! feed.publish(MapMode::Providers, vec![
//!     ProviderEntity::new("ph-1", ProviderType::Pharmacy, Coordinates::new(35.2, -0.63)),
//! ]);
//! assert!(matches!(&*rx.borrow(), FeedState::Ready(s) if s.len() == 1));
//! ```

mod feed;
mod loader;
mod types;

pub use feed::{FeedState, InMemoryProviderFeed, ProviderFeed, ProviderSnapshot};
pub use loader::{load_providers_json, parse_providers_json, ProviderLoadError};
pub use types::{DisplayEntity, ProviderEntity, ProviderType};
