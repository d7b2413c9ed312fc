//! Adapter onto the `tracing` crate.

use super::{LogLevel, Logger};
use std::fmt::Arguments;

/// Forwards to `tracing` under the `medmap` target.
///
/// Output only appears once a subscriber is installed, see
/// [`init_logging`](crate::logging::init_logging).
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        match level {
            LogLevel::Trace => tracing::trace!(target: "medmap", "{}", args),
            LogLevel::Debug => tracing::debug!(target: "medmap", "{}", args),
            LogLevel::Info => tracing::info!(target: "medmap", "{}", args),
            LogLevel::Warn => tracing::warn!(target: "medmap", "{}", args),
            LogLevel::Error => tracing::error!(target: "medmap", "{}", args),
        }
    }
}
