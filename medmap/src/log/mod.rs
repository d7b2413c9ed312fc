//! Logging seam for engine components.
//!
//! Components hold an `Arc<dyn Logger>` instead of calling `tracing`
//! directly, so tests can swap in [`MemoryLogger`] and assert on what was
//! reported (skipped entities, deferred mounts, stale passes).
//!
//! ```
//! use medmap::log::{Logger, NoOpLogger};
//! use medmap::log_info;
//! use std::sync::Arc;
//!
//! let logger: Arc<dyn Logger> = Arc::new(NoOpLogger);
//! log_info!(logger, "surface ready");
//! ```

mod memory;
mod noop;
mod tracing_adapter;
mod r#trait;

pub use memory::MemoryLogger;
pub use noop::NoOpLogger;
pub use r#trait::{LogLevel, Logger};
pub use tracing_adapter::TracingLogger;
