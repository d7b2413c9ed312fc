//! CLI error handling with user-friendly messages.
//!
//! Centralizes error formatting and exit codes for every command.

use std::fmt;
use std::process;

use medmap::config::ConfigFileError;
use medmap::provider::ProviderLoadError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration file could not be read, parsed or written
    Config(ConfigFileError),
    /// Provider file could not be loaded
    Providers(ProviderLoadError),
    /// Command-line input that clap accepted but the engine cannot use
    InvalidArgument(String),
    /// Output serialization failed
    Output(String),
}

impl CliError {
    /// Exit code for this error.
    pub fn code(&self) -> i32 {
        match self {
            CliError::InvalidArgument(_) => 2,
            _ => 1,
        }
    }

    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Config(ConfigFileError::InvalidValue { section, key, .. }) => {
                eprintln!();
                eprintln!("Fix [{}] {} in the config file, or regenerate it with:", section, key);
                eprintln!("  medmap config path    # locate the file");
                eprintln!("  medmap config init --force");
            }
            CliError::Providers(ProviderLoadError::Parse { .. }) => {
                eprintln!();
                eprintln!("The provider file must be a JSON array of objects with at least:");
                eprintln!("  id, type, coordinates {{ latitude, longitude }}, display_name");
            }
            _ => {}
        }

        process::exit(self.code())
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Providers(e) => write!(f, "{}", e),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::Output(msg) => write!(f, "Failed to write output: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Providers(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<ProviderLoadError> for CliError {
    fn from(e: ProviderLoadError) -> Self {
        CliError::Providers(e)
    }
}
