//! Map surface lifecycle.
//!
//! [`MapLifecycle`] is the single owner of the renderer surface. Every
//! camera move, layer attach or detach, tile swap and size invalidation
//! goes through it, so the rest of the engine never touches a surface that
//! does not exist yet.
//!
//! # State Machine
//!
//! ```text
//! Uninitialized --[mount, container attached]--> Ready { theme }
//! Uninitialized --[mount, container detached]--> Pending { attempts: 1 }
//! Pending --[mount / retry_pending, still detached]--> Pending { attempts + 1 }
//! Pending --[mount / retry_pending, attached]--> Ready { theme }
//! Ready --[mount]--> Ready (no-op)
//! Ready --[set_theme]--> Ready { new theme } (tile URL swapped in place)
//! any --[unmount]--> Uninitialized
//! ```

mod camera;
mod lifecycle;
mod theme;

pub use camera::{CameraAnimation, CameraRequest};
pub use lifecycle::{LifecycleState, MapLifecycle, MountOutcome, SurfaceOptions};
pub use theme::{MapTheme, ParseThemeError};
