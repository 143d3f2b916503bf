//! Core types and definitions for the stratview strategy studio.
//!
//! This crate defines the vocabulary shared across all other crates:
//! poses and curve geometry, editor commands, control commands, events,
//! playback snapshots, configuration and constants.
//! It has no dependency on Tauri or any runtime framework.

pub mod blocks;
pub mod commands;
pub mod config;
pub mod constants;
pub mod curve;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
