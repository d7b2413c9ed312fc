//! Configuration.
//!
//! User settings live in `~/.medmap/config.ini` ([`ConfigFile`]); the
//! engine consumes the typed [`EngineConfig`] derived from it.
//!
//! ```
//! use medmap::config::{ConfigFile, EngineConfig};
//!
//! let config = EngineConfig::from(&ConfigFile::default());
//! assert_eq!(config.cluster.radius_px, 45);
//! ```

pub mod defaults;
mod engine;
mod file;
mod parser;
mod settings;
mod writer;

pub use engine::EngineConfig;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{CameraSettings, ClusterSettings, ConfigFile, LoggingSettings, MapSettings};
