//! Playback engine for stratview.
//!
//! Parses editor programs into action queues and preview curves, plays the
//! queue back at a fixed tick rate against a simulated robot, and produces
//! `PlaybackSnapshot`s for the frontend. Headless and deterministic.

pub mod bounds;
pub mod engine;
pub mod feedback;
pub mod parser;
mod snapshot;
pub mod timers;

pub use engine::PlaybackEngine;
pub use stratview_core as core;
