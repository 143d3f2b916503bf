//! Stratview application shell.
//!
//! Hosts the playback engine on a fixed-rate loop thread, stores strategies
//! on disk, and (with the `desktop` feature) exposes everything to the
//! frontend through Tauri IPC commands and events.

pub mod config;
pub mod logging;
pub mod playback_loop;
pub mod program;
pub mod state;
pub mod store;

#[cfg(feature = "desktop")]
pub mod ipc;

pub use stratview_core as core;
pub use stratview_sim as sim;
