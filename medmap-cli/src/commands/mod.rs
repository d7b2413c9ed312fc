//! Command handlers for the MedMap CLI.
//!
//! - `simulate`: run a headless map session over a provider file
//! - `distance`: great-circle distance between two points
//! - `config`: locate, print or create the configuration file

pub mod config;
pub mod distance;
pub mod simulate;
