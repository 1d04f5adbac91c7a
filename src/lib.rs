//! Workspace facade crate.
//!
//! Re-exports the individual workspace crates so host applications can
//! depend on `tpc-workspace` alone. The `desktop-shims` feature (default)
//! pulls in the desktop transport; headless hosts disable it and inject
//! their own `bridge-traits` implementations.

pub use bridge_traits;
pub use core_metadata;
pub use core_playback;
pub use core_runtime;
pub use core_search;

#[cfg(feature = "desktop-shims")]
pub use bridge_desktop;
