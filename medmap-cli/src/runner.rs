//! CLI runner for common setup.
//!
//! Loads the configuration file and installs logging so command handlers
//! start from a ready environment.

use std::path::{Path, PathBuf};

use medmap::config::{config_file_path, ConfigFile, EngineConfig};
use medmap::logging::{init_logging, split_log_path, LoggingGuard};
use tracing::info;

use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Keeps the file writer alive while the runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    config: ConfigFile,
    config_path: PathBuf,
}

impl CliRunner {
    /// Load the config (defaults when missing) and initialize logging.
    ///
    /// Logs go to the configured file only; stdout carries command output.
    pub fn new(config_path: Option<&Path>) -> Result<Self, CliError> {
        let config_path = resolve_config_path(config_path);
        let config = ConfigFile::load_from(&config_path)?;

        let (log_dir, log_file) = split_log_path(&config.logging.file);
        let logging_guard = init_logging(log_dir, log_file, false)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
            config_path,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Engine settings derived from the loaded configuration.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::from(&self.config)
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("MedMap v{}", medmap::VERSION);
        info!(config = %self.config_path.display(), "MedMap CLI: {} command", command);
    }
}

/// The `--config` override, or `~/.medmap/config.ini`.
pub fn resolve_config_path(config_path: Option<&Path>) -> PathBuf {
    config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config_file_path)
}
