//! Playback loop thread: runs the engine at the configured tick rate and
//! publishes snapshots.
//!
//! The engine is created inside the thread and never shared. Commands arrive
//! over an `mpsc` channel; every snapshot goes to a [`SnapshotSink`] and is
//! kept in shared state for synchronous polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use stratview_core::config::StudioConfig;
use stratview_core::enums::{ConsoleLevel, PlaybackPhase};
use stratview_core::state::PlaybackSnapshot;
use stratview_core::types::SourceId;
use stratview_sim::feedback::{apply_feedback, EditorHooks};
use stratview_sim::PlaybackEngine;

use crate::state::LoopCommand;

/// Destination for every snapshot the loop produces.
pub trait SnapshotSink: Send + 'static {
    fn publish(&mut self, snapshot: &PlaybackSnapshot);
}

/// Sink that writes console lines and editor feedback to the log. Used when
/// there is no editor attached.
#[derive(Debug, Default)]
pub struct LogSink {
    editor: LogEditor,
}

impl SnapshotSink for LogSink {
    fn publish(&mut self, snapshot: &PlaybackSnapshot) {
        for line in &snapshot.console {
            match line.level {
                ConsoleLevel::Info => info!(tick = line.tick, "{}", line.message),
                ConsoleLevel::Warning => warn!(tick = line.tick, "{}", line.message),
            }
        }
        apply_feedback(&snapshot.feedback, &mut self.editor);
    }
}

/// Editor stand-in that logs each hook call.
#[derive(Debug, Default)]
struct LogEditor;

impl EditorHooks for LogEditor {
    fn highlight(&mut self, source_id: Option<&SourceId>) {
        match source_id {
            Some(id) => debug!(block = %id, "highlight"),
            None => debug!("highlight cleared"),
        }
    }

    fn mark_error(&mut self, source_id: &SourceId, message: &str) {
        warn!(block = %source_id, "{message}");
    }

    fn clear_all_warnings(&mut self) {
        debug!("warnings cleared");
    }
}

/// Wall-clock duration of one tick.
pub fn tick_duration(tick_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(tick_rate.max(1)))
}

/// Spawns the playback loop in a new thread.
///
/// Returns the command sender for the IPC layer to use.
pub fn spawn_playback_loop(
    config: StudioConfig,
    sink: Box<dyn SnapshotSink>,
    latest_snapshot: Arc<Mutex<Option<PlaybackSnapshot>>>,
) -> std::io::Result<mpsc::Sender<LoopCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    std::thread::Builder::new()
        .name("stratview-playback".into())
        .spawn(move || {
            run_playback_loop(config, cmd_rx, sink, &latest_snapshot);
        })?;

    Ok(cmd_tx)
}

/// Forward every pending message to the engine. Returns `false` once the loop
/// should stop.
pub fn drain_commands(engine: &mut PlaybackEngine, cmd_rx: &mpsc::Receiver<LoopCommand>) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(LoopCommand::Control(cmd)) => engine.queue_command(cmd),
            Ok(LoopCommand::FireTimer(key)) => engine.fire_timer(key),
            Ok(LoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}

/// The loop. Runs until Shutdown or channel disconnect.
fn run_playback_loop(
    config: StudioConfig,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    mut sink: Box<dyn SnapshotSink>,
    latest_snapshot: &Mutex<Option<PlaybackSnapshot>>,
) {
    let tick = tick_duration(config.tick_rate);
    let mut engine = PlaybackEngine::new(config);
    let mut next_tick_time = Instant::now();
    info!(tick_ms = tick.as_secs_f64() * 1000.0, "playback loop started");

    while drain_commands(&mut engine, &cmd_rx) {
        let snapshot = engine.tick();
        sink.publish(&snapshot);

        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        next_tick_time += tick;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick * 2 {
            // Too far behind; drop the backlog instead of spinning to catch up.
            next_tick_time = now;
        }
    }

    info!("playback loop stopped");
}

/// Tick `engine` until it goes idle, publishing every snapshot. Used by
/// headless runs, which do not need wall-clock pacing.
pub fn run_until_idle(
    engine: &mut PlaybackEngine,
    sink: &mut dyn SnapshotSink,
    max_ticks: u64,
) -> Option<PlaybackSnapshot> {
    for _ in 0..max_ticks {
        let snapshot = engine.tick();
        sink.publish(&snapshot);
        if snapshot.phase == PlaybackPhase::Idle {
            return Some(snapshot);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use stratview_core::commands::{ControlCommand, EditorCommand};

    use super::*;

    /// Sink that forwards snapshots to a channel.
    struct ChannelSink(mpsc::Sender<PlaybackSnapshot>);

    impl SnapshotSink for ChannelSink {
        fn publish(&mut self, snapshot: &PlaybackSnapshot) {
            let _ = self.0.send(snapshot.clone());
        }
    }

    #[derive(Default)]
    struct CountingSink {
        published: usize,
    }

    impl SnapshotSink for CountingSink {
        fn publish(&mut self, _snapshot: &PlaybackSnapshot) {
            self.published += 1;
        }
    }

    #[test]
    fn test_drain_forwards_and_stops_on_shutdown() {
        let (tx, rx) = mpsc::channel::<LoopCommand>();
        let mut engine = PlaybackEngine::new(StudioConfig::default());

        tx.send(LoopCommand::Control(ControlCommand::RunSimulation {
            program: vec![EditorCommand::move_to("g", 1000.0, 1000.0, 0.0, 200.0)],
        }))
        .unwrap();
        assert!(drain_commands(&mut engine, &rx));
        let snap = engine.tick();
        assert_eq!(snap.phase, PlaybackPhase::Moving);

        tx.send(LoopCommand::Shutdown).unwrap();
        assert!(!drain_commands(&mut engine, &rx));

        drop(tx);
        assert!(!drain_commands(&mut engine, &rx));
    }

    #[test]
    fn test_run_until_idle_publishes_every_tick() {
        let mut engine = PlaybackEngine::new(StudioConfig::default());
        engine.queue_command(ControlCommand::RunSimulation {
            program: vec![EditorCommand::move_to("g", 1000.0, 1000.0, 0.0, 200.0)],
        });

        let mut sink = CountingSink::default();
        let last = run_until_idle(&mut engine, &mut sink, 1000).unwrap();
        assert_eq!(last.phase, PlaybackPhase::Idle);
        // The run starts on the first tick, so one snapshot per clock tick.
        assert_eq!(sink.published as u64, last.time.tick);

        let mut log = LogSink::default();
        engine.queue_command(ControlCommand::RunSimulation {
            program: vec![EditorCommand::move_to("g", 1000.0, 1000.0, 0.0, 200.0)],
        });
        assert!(run_until_idle(&mut engine, &mut log, 10).is_none());
    }

    #[test]
    fn test_spawned_loop_runs_and_shuts_down() {
        let latest = Arc::new(Mutex::new(None));
        let (snap_tx, snap_rx) = mpsc::channel();
        let cmd_tx = spawn_playback_loop(
            StudioConfig::default(),
            Box::new(ChannelSink(snap_tx)),
            latest.clone(),
        )
        .unwrap();

        cmd_tx
            .send(LoopCommand::Control(ControlCommand::RunSimulation {
                program: Vec::new(),
            }))
            .unwrap();

        let completed = loop {
            let snap = snap_rx.recv_timeout(Duration::from_secs(5)).unwrap();
            if snap.run_id == 1 && snap.phase == PlaybackPhase::Idle {
                break snap;
            }
        };
        assert_eq!(completed.queue_remaining, 0);

        cmd_tx.send(LoopCommand::Shutdown).unwrap();
        // The sink is dropped when the thread exits.
        while snap_rx.recv_timeout(Duration::from_secs(5)).is_ok() {}
        assert!(latest.lock().unwrap().is_some());
    }

    #[test]
    fn test_tick_duration() {
        assert_eq!(
            tick_duration(60).as_nanos(),
            u128::from(1_000_000_000u64 / 60)
        );
        assert_eq!(tick_duration(0), Duration::from_secs(1));
    }
}
