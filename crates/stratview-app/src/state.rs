//! Application state shared across Tauri commands and the playback loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use stratview_core::commands::ControlCommand;
use stratview_core::config::StudioConfig;
use stratview_core::state::PlaybackSnapshot;
use stratview_sim::timers::TimerKey;

/// Messages from the IPC layer to the playback loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// Forward to the engine's command queue.
    Control(ControlCommand),
    /// Timer firing from a host-side clock.
    FireTimer(TimerKey),
    /// Stop the loop thread.
    Shutdown,
}

/// Shared application state, stored as Tauri managed state.
///
/// Managed state must be Send + Sync, hence the `Mutex` around the sender
/// and the `Arc<Mutex<..>>` for the snapshot shared with the loop thread.
pub struct AppState {
    /// Engine configuration, fixed for the lifetime of the loop.
    pub config: StudioConfig,
    /// `None` until `start_playback_loop` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<LoopCommand>>>,
    /// Latest snapshot for synchronous `get_snapshot` queries.
    pub latest_snapshot: Arc<Mutex<Option<PlaybackSnapshot>>>,
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(StudioConfig::default())
    }
}

impl AppState {
    pub fn new(config: StudioConfig) -> Self {
        Self {
            config,
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
        }
    }

    /// Send `command` to the loop thread.
    pub fn send(&self, command: LoopCommand) -> Result<(), String> {
        let tx_lock = self.command_tx.lock().map_err(|e| e.to_string())?;

        match tx_lock.as_ref() {
            Some(tx) => tx
                .send(command)
                .map_err(|e| format!("Failed to send command: {e}")),
            None => Err("Playback loop not started".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::default();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert!(!*state.running.lock().unwrap());
    }

    #[test]
    fn test_send_before_start_fails() {
        let state = AppState::default();
        let err = state
            .send(LoopCommand::Control(ControlCommand::Pause))
            .unwrap_err();
        assert_eq!(err, "Playback loop not started");
    }

    #[test]
    fn test_send_forwards_to_channel() {
        let state = AppState::default();
        let (tx, rx) = mpsc::channel();
        *state.command_tx.lock().unwrap() = Some(tx);

        state
            .send(LoopCommand::Control(ControlCommand::Resume))
            .unwrap();
        assert!(matches!(
            rx.try_recv().unwrap(),
            LoopCommand::Control(ControlCommand::Resume)
        ));
    }
}
