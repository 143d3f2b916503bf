//! Playback engine: the sequencer behind the strategy simulator.
//!
//! `PlaybackEngine` owns the live robot pose, the action queue of the current
//! run, the preview curves and the run clock. The host queues
//! `ControlCommand`s and calls [`PlaybackEngine::tick`] at a fixed rate; each
//! tick processes commands, advances the sequencer by one step and returns a
//! `PlaybackSnapshot`. Completely headless (no Tauri dependency), so runs are
//! reproducible tick for tick.

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use stratview_core::commands::{ActionKind, ControlCommand, EditorCommand};
use stratview_core::config::StudioConfig;
use stratview_core::constants::MAX_CONSOLE_LINES;
use stratview_core::curve::CurveSegment;
use stratview_core::enums::{ConsoleLevel, ParseMode, PlaybackPhase};
use stratview_core::events::{ConsoleLine, EditorFeedback, PlaybackEvent};
use stratview_core::state::{PlaybackSnapshot, PreviewView};
use stratview_core::types::{secs_to_ticks, Pose, SimTime, SourceId};

use crate::bounds::is_out_of_bounds;
use crate::feedback;
use crate::parser::{self, QueueEntry};
use crate::snapshot;
use crate::timers::{TimerKey, TimerQueue};

/// Queue entry currently being played.
#[derive(Debug, Clone)]
pub(crate) enum ActiveEntry {
    Move {
        segment: CurveSegment,
        target: Pose,
        /// Live robot has left the arena during this segment.
        left_arena: bool,
    },
    Action {
        source_id: SourceId,
        action: ActionKind,
        timer: TimerKey,
        due_tick: u64,
    },
}

impl ActiveEntry {
    pub(crate) fn source_id(&self) -> &SourceId {
        match self {
            ActiveEntry::Move { segment, .. } => &segment.source_id,
            ActiveEntry::Action { source_id, .. } => source_id,
        }
    }
}

/// The playback engine. Owns every piece of mutable playback state.
pub struct PlaybackEngine {
    config: StudioConfig,
    time: SimTime,
    run_id: u64,
    phase: PlaybackPhase,
    paused: bool,
    robot: Pose,
    queue: VecDeque<QueueEntry>,
    active: Option<ActiveEntry>,
    progress: f64,
    timers: TimerQueue,
    next_timer_seq: u64,
    preview: PreviewView,
    command_queue: VecDeque<ControlCommand>,
    events: Vec<PlaybackEvent>,
    feedback: Vec<EditorFeedback>,
    console: VecDeque<ConsoleLine>,
    /// Firing of the pending hold that arrived while paused.
    held_timer: Option<TimerKey>,
    stale_timer_discards: u64,
}

impl PlaybackEngine {
    /// Create an idle engine with the robot at the configured start pose.
    pub fn new(config: StudioConfig) -> Self {
        let robot = parser::initial_pose(&config);
        Self {
            config,
            time: SimTime::default(),
            run_id: 0,
            phase: PlaybackPhase::Idle,
            paused: false,
            robot,
            queue: VecDeque::new(),
            active: None,
            progress: 0.0,
            timers: TimerQueue::new(),
            next_timer_seq: 0,
            preview: PreviewView::default(),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            feedback: Vec::new(),
            console: VecDeque::new(),
            held_timer: None,
            stale_timer_discards: 0,
        }
    }

    /// Queue a control command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: ControlCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = ControlCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance playback by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> PlaybackSnapshot {
        self.process_commands();

        if !self.paused && self.phase != PlaybackPhase::Idle {
            self.time.advance(self.config.dt());
            self.step_motion();
            self.fire_due_timers();
        }

        snapshot::build_snapshot(
            &self.time,
            self.run_id,
            self.phase,
            self.paused,
            self.config.team,
            self.robot,
            self.progress,
            self.active.as_ref(),
            self.queue.len(),
            &self.preview,
            self.config.dt(),
            std::mem::take(&mut self.events),
            std::mem::take(&mut self.feedback),
            self.console.drain(..).collect(),
        )
    }

    /// Deliver a timer firing from an external clock. Firings that do not
    /// match the hold currently pending are ignored; a matching firing
    /// received while paused takes effect on resume.
    pub fn fire_timer(&mut self, key: TimerKey) {
        self.handle_timer(key);
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Live robot pose.
    pub fn robot(&self) -> Pose {
        self.robot
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn active_source_id(&self) -> Option<&SourceId> {
        self.active.as_ref().map(ActiveEntry::source_id)
    }

    /// Key of the hold the engine is waiting on, if any.
    pub fn pending_timer(&self) -> Option<TimerKey> {
        match self.active {
            Some(ActiveEntry::Action { timer, .. }) => Some(timer),
            _ => None,
        }
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn preview(&self) -> &PreviewView {
        &self.preview
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    /// Timer firings dropped because they belonged to an earlier run or entry.
    pub fn stale_timer_discards(&self) -> u64 {
        self.stale_timer_discards
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single control command.
    fn handle_command(&mut self, command: ControlCommand) {
        match command {
            ControlCommand::RunSimulation { program } => self.start_run(&program),
            ControlCommand::GeneratePreview { program } => self.generate_preview(&program),
            ControlCommand::ClearPreview => {
                self.preview = PreviewView::default();
            }
            ControlCommand::Pause => {
                if self.phase != PlaybackPhase::Idle && !self.paused {
                    self.paused = true;
                    self.log(ConsoleLevel::Info, "Paused".into());
                }
            }
            ControlCommand::Resume => {
                if self.paused {
                    self.paused = false;
                    self.log(ConsoleLevel::Info, "Resumed".into());
                    if let Some(key) = self.held_timer.take() {
                        self.handle_timer(key);
                    }
                }
            }
            ControlCommand::SetTeam { team } => {
                self.config.team = team;
                if self.phase == PlaybackPhase::Idle {
                    self.robot = parser::initial_pose(&self.config);
                }
                info!(?team, "team changed");
            }
        }
    }

    /// Discard everything from the previous run and start playing `program`.
    fn start_run(&mut self, program: &[EditorCommand]) {
        // Timers from the old run stay queued; the run id change makes them stale.
        self.run_id += 1;
        self.time = SimTime::default();
        self.paused = false;
        self.held_timer = None;
        self.queue.clear();
        self.active = None;
        self.progress = 0.0;
        self.next_timer_seq = 0;
        self.preview = PreviewView::default();
        self.feedback.push(EditorFeedback::ClearWarnings);

        self.robot = parser::initial_pose(&self.config);
        let parsed = parser::parse(program, ParseMode::Execute, &self.config);
        if let Some(pose) = parsed.live_reset {
            self.robot = pose;
            self.events.push(PlaybackEvent::StartPoseApplied { pose });
            self.log(
                ConsoleLevel::Info,
                format!("Start: {:.0}, {:.0}", pose.x, pose.y),
            );
        }
        self.queue = parsed.queue.into();

        info!(
            run_id = self.run_id,
            entries = self.queue.len(),
            "simulation run started"
        );
        self.events.push(PlaybackEvent::RunStarted {
            run_id: self.run_id,
            queue_len: self.queue.len(),
        });
        self.log(ConsoleLevel::Info, "Simulation...".into());

        self.advance();
    }

    /// Rebuild the preview and flag out-of-arena segments.
    fn generate_preview(&mut self, program: &[EditorCommand]) {
        let parsed = parser::parse(program, ParseMode::Preview, &self.config);
        let report = feedback::check_preview(parsed.preview, &self.config.arena);

        self.feedback.push(EditorFeedback::ClearWarnings);
        self.feedback.extend(report.feedback);
        self.preview = report.preview;

        let curves = self.preview.curves.len();
        let violations = self.preview.violation_count;
        self.events
            .push(PlaybackEvent::PreviewGenerated { curves, violations });
        if violations > 0 {
            warn!(violations, "preview leaves the arena");
            self.log(
                ConsoleLevel::Warning,
                format!("{violations} segment(s) leave the arena"),
            );
        } else {
            debug!(curves, "preview generated");
            self.log(ConsoleLevel::Info, "Preview generated".into());
        }
    }

    /// Move along the active curve by one tick's worth of progress.
    fn step_motion(&mut self) {
        let Some(ActiveEntry::Move {
            segment,
            target,
            left_arena,
        }) = self.active.as_mut()
        else {
            return;
        };

        self.progress += self.config.progress_per_tick;
        if self.progress >= 1.0 {
            // Snap to the exact target so rounding never accumulates across segments.
            self.robot = *target;
            let source_id = segment.source_id.clone();
            self.events.push(PlaybackEvent::SegmentFinished {
                source_id,
                pose: self.robot,
            });
            self.progress = 0.0;
            self.advance();
            return;
        }

        let position = segment.curve.point_at(self.progress);
        if let Some(heading) = segment.curve.heading_at(
            self.progress,
            self.config.heading_mode,
            self.config.tangent_epsilon,
        ) {
            self.robot.theta = heading;
        }
        self.robot = self.robot.with_position(position);

        if !*left_arena && is_out_of_bounds(position, &self.config.arena) {
            *left_arena = true;
            let source_id = segment.source_id.clone();
            warn!(%source_id, x = position.x, y = position.y, "robot left the arena");
            self.log(
                ConsoleLevel::Warning,
                format!(
                    "Robot off the table at ({:.0}, {:.0})",
                    position.x, position.y
                ),
            );
        }
    }

    /// Deliver every internal timer that is due on this tick.
    fn fire_due_timers(&mut self) {
        for key in self.timers.pop_due(self.time.tick) {
            self.handle_timer(key);
        }
    }

    fn handle_timer(&mut self, key: TimerKey) {
        let pending = match &self.active {
            Some(ActiveEntry::Action {
                source_id, timer, ..
            }) if *timer == key => source_id.clone(),
            _ => {
                self.stale_timer_discards += 1;
                debug!(?key, run_id = self.run_id, "discarding stale timer");
                return;
            }
        };

        if self.paused {
            debug!(?key, "holding timer until resume");
            self.held_timer = Some(key);
            return;
        }

        self.events
            .push(PlaybackEvent::ActionFinished { source_id: pending });
        self.advance();
    }

    /// Pop the next queue entry and enter the matching phase.
    fn advance(&mut self) {
        self.set_phase(PlaybackPhase::Advance);

        let Some(entry) = self.queue.pop_front() else {
            self.finish_run();
            return;
        };

        self.feedback.push(EditorFeedback::Highlight {
            source_id: Some(entry.source_id().clone()),
        });

        match entry {
            QueueEntry::Move { segment, target } => {
                self.log(
                    ConsoleLevel::Info,
                    format!("Go ({:.0}, {:.0})", target.x, target.y),
                );
                self.events.push(PlaybackEvent::SegmentStarted {
                    source_id: segment.source_id.clone(),
                    target,
                });
                self.progress = 0.0;
                self.active = Some(ActiveEntry::Move {
                    segment,
                    target,
                    left_arena: false,
                });
                self.set_phase(PlaybackPhase::Moving);
            }
            QueueEntry::Action {
                source_id,
                action,
                duration_secs,
            } => {
                let timer = TimerKey {
                    run_id: self.run_id,
                    seq: self.next_timer_seq,
                };
                self.next_timer_seq += 1;
                let due_tick = self.time.tick + secs_to_ticks(duration_secs, self.config.tick_rate);
                self.timers.schedule(timer, due_tick);

                self.log(ConsoleLevel::Info, action.label().to_string());
                self.events.push(PlaybackEvent::ActionStarted {
                    source_id: source_id.clone(),
                    action: action.clone(),
                    duration_secs,
                });
                self.progress = 0.0;
                self.active = Some(ActiveEntry::Action {
                    source_id,
                    action,
                    timer,
                    due_tick,
                });
                self.set_phase(PlaybackPhase::Pausing);
            }
        }
    }

    /// Queue exhausted: go idle and clear highlighting.
    fn finish_run(&mut self) {
        self.active = None;
        self.progress = 0.0;
        self.paused = false;
        self.held_timer = None;
        // Nothing can be waiting any more; whatever is left is stale.
        self.timers.clear();
        self.set_phase(PlaybackPhase::Idle);

        self.feedback
            .push(EditorFeedback::Highlight { source_id: None });
        self.events.push(PlaybackEvent::RunCompleted {
            run_id: self.run_id,
        });
        info!(run_id = self.run_id, ticks = self.time.tick, "simulation run complete");
        self.log(ConsoleLevel::Info, "Done.".into());
    }

    fn set_phase(&mut self, phase: PlaybackPhase) {
        self.phase = phase;
        self.events.push(PlaybackEvent::PhaseEntered { phase });
    }

    fn log(&mut self, level: ConsoleLevel, message: String) {
        if self.console.len() >= MAX_CONSOLE_LINES {
            self.console.pop_front();
        }
        self.console.push_back(ConsoleLine {
            level,
            message,
            tick: self.time.tick,
        });
    }
}
