//! Tauri IPC command handlers.
//!
//! These `#[tauri::command]` functions are invoked by the frontend via `invoke()`.
//! They bridge frontend requests to the playback loop thread via channels.

use std::path::PathBuf;

use serde_json::Value;
use tauri::{AppHandle, Emitter, Manager, State};
use tracing::warn;

use stratview_core::commands::ControlCommand;
use stratview_core::state::PlaybackSnapshot;
use stratview_sim::timers::TimerKey;

use crate::playback_loop::{self, SnapshotSink};
use crate::program::{self, EditorProgram};
use crate::state::{AppState, LoopCommand};
use crate::store::{StrategyFile, StrategyStore};

/// Event carrying each tick's snapshot.
pub const SNAPSHOT_EVENT: &str = "playback:snapshot";

/// Emits snapshots to the webview.
struct TauriSink {
    app_handle: AppHandle,
}

impl SnapshotSink for TauriSink {
    fn publish(&mut self, snapshot: &PlaybackSnapshot) {
        if let Err(e) = self.app_handle.emit(SNAPSHOT_EVENT, snapshot) {
            warn!(error = %e, "failed to emit snapshot");
        }
    }
}

fn strategy_store(app: &AppHandle) -> StrategyStore {
    let dir = app
        .path()
        .app_data_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("strategies");
    StrategyStore::new(dir)
}

/// Start the playback loop if it is not already running.
///
/// Frontend: `invoke("start_playback_loop")`
#[tauri::command]
pub fn start_playback_loop(app_handle: AppHandle, state: State<'_, AppState>) -> Result<(), String> {
    let mut running = state.running.lock().map_err(|e| e.to_string())?;

    if *running {
        return Err("Playback loop already running".into());
    }

    let sink = Box::new(TauriSink { app_handle });
    let cmd_tx = playback_loop::spawn_playback_loop(
        state.config.clone(),
        sink,
        state.latest_snapshot.clone(),
    )
    .map_err(|e| format!("Failed to spawn playback loop: {e}"))?;

    let mut tx_lock = state.command_tx.lock().map_err(|e| e.to_string())?;
    *tx_lock = Some(cmd_tx);
    *running = true;

    Ok(())
}

/// Frontend: `invoke("send_control", { command })`
#[tauri::command]
pub fn send_control(command: ControlCommand, state: State<'_, AppState>) -> Result<(), String> {
    state.send(LoopCommand::Control(command))
}

/// Deliver a timer firing from a frontend-side clock.
///
/// Frontend: `invoke("fire_timer", { key })`
#[tauri::command]
pub fn fire_timer(key: TimerKey, state: State<'_, AppState>) -> Result<(), String> {
    state.send(LoopCommand::FireTimer(key))
}

/// Latest snapshot, for polling and initial state.
///
/// Frontend: `invoke("get_snapshot")`
#[tauri::command]
pub fn get_snapshot(state: State<'_, AppState>) -> Result<Option<PlaybackSnapshot>, String> {
    let lock = state.latest_snapshot.lock().map_err(|e| e.to_string())?;
    Ok(lock.clone())
}

/// Turn raw editor blocks into a typed program.
///
/// Frontend: `invoke("decode_blocks", { blocks })`
#[tauri::command]
pub fn decode_blocks(blocks: Vec<Value>) -> EditorProgram {
    program::decode_program(&blocks)
}

/// Frontend: `invoke("list_strategies")`
#[tauri::command]
pub fn list_strategies(app: AppHandle) -> Result<Vec<String>, String> {
    strategy_store(&app).list().map_err(|e| e.to_string())
}

/// Frontend: `invoke("load_strategy", { name })`
#[tauri::command]
pub fn load_strategy(app: AppHandle, name: String) -> Result<StrategyFile, String> {
    strategy_store(&app).load(&name).map_err(|e| e.to_string())
}

/// Frontend: `invoke("save_strategy", { file })`
#[tauri::command]
pub fn save_strategy(app: AppHandle, file: StrategyFile) -> Result<(), String> {
    strategy_store(&app)
        .save(&file.name, &file)
        .map_err(|e| e.to_string())
}
