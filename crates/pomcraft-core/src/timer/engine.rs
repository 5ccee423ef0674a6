//! Timer engine implementation.
//!
//! The timer engine is a tick-driven state machine. It does not use internal
//! threads - the caller is responsible for calling `tick()` once per
//! wall-clock second while the countdown is running.
//!
//! ## Session cycle
//!
//! ```text
//! work -> short_break -> work -> short_break -> ... -> work -> long_break
//! ```
//!
//! Every Nth completed work session (N = `sessions_until_long_break`)
//! escalates the following break to a long break; a completed break of
//! either kind always leads back to work. Completing a session leaves the
//! engine stopped - the next session never starts on its own.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new();
//! engine.subscribe(|event| println!("{event:?}"));
//! engine.start();
//! // Once per second:
//! engine.tick();
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::{Listeners, TimerEvent};

/// Kind of the active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Work,
    ShortBreak,
    LongBreak,
}

/// Whether the active session's countdown is advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Stopped,
    Running,
    Paused,
}

/// Core timer engine.
///
/// Holds the configured duration for each session kind plus the live
/// countdown. In-memory only: an in-progress countdown does not survive the
/// process.
#[derive(Debug)]
pub struct TimerEngine {
    work_secs: u32,
    short_break_secs: u32,
    long_break_secs: u32,
    sessions_until_long_break: u32,
    session: SessionKind,
    /// Invariant: `remaining_secs <= total_secs`.
    remaining_secs: u32,
    total_secs: u32,
    running: bool,
    completed_sessions: u32,
    listeners: Listeners<TimerEvent>,
}

impl TimerEngine {
    /// Create an engine with the classic Pomodoro defaults: 25 minute work
    /// sessions, 5/15 minute breaks, long break every 4th work session.
    ///
    /// Starts stopped, on a work session at full duration.
    pub fn new() -> Self {
        let work_secs = 25 * 60;
        Self {
            work_secs,
            short_break_secs: 5 * 60,
            long_break_secs: 15 * 60,
            sessions_until_long_break: 4,
            session: SessionKind::Work,
            remaining_secs: work_secs,
            total_secs: work_secs,
            running: false,
            completed_sessions: 0,
            listeners: Listeners::new(),
        }
    }

    /// Register a callback invoked for every event the engine emits.
    pub fn subscribe(&mut self, callback: impl FnMut(&TimerEvent) + 'static) {
        self.listeners.subscribe(callback);
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Remaining time formatted as `MM:SS`.
    pub fn time_text(&self) -> String {
        format!("{:02}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }

    /// 0.0 .. 1.0 progress within the current session.
    pub fn progress(&self) -> f64 {
        1.0 - (self.remaining_secs as f64 / self.total_secs as f64)
    }

    pub fn session(&self) -> SessionKind {
        self.session
    }

    /// Derived run-state: `Running` while counting down, `Paused` when held
    /// partway through, `Stopped` at rest at full duration.
    pub fn run_state(&self) -> RunState {
        if self.running {
            RunState::Running
        } else if self.remaining_secs < self.total_secs {
            RunState::Paused
        } else {
            RunState::Stopped
        }
    }

    /// Count of completed work sessions since process start.
    pub fn completed_sessions(&self) -> u32 {
        self.completed_sessions
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin (or resume) the countdown. No-op if already running.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.emit_state(RunState::Running);
        }
    }

    /// Halt the countdown, preserving the remaining time. No-op if not
    /// running.
    pub fn pause(&mut self) {
        if self.running {
            self.running = false;
            self.emit_state(RunState::Paused);
        }
    }

    /// Restart the current session from its full duration, stopped.
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining_secs = self.total_secs;
        self.emit_display();
        self.emit_state(RunState::Stopped);
    }

    /// Force immediate completion of the current session, as if the
    /// countdown had reached zero.
    pub fn skip(&mut self) {
        self.complete_session();
    }

    /// Advance the countdown by one second. Call once per wall-clock second
    /// while running; completes the session once the countdown is exhausted.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        if self.remaining_secs > 0 {
            self.remaining_secs -= 1;
            self.emit_display();
        } else {
            self.complete_session();
        }
    }

    /// Set the work session duration.
    ///
    /// Takes effect immediately when the active session is a stopped-or-
    /// paused work session; otherwise applies the next time a work session
    /// starts. Minutes are clamped to a minimum of 1.
    pub fn set_work_duration(&mut self, minutes: u32) {
        self.work_secs = minutes.max(1) * 60;
        if self.session == SessionKind::Work && !self.running {
            self.total_secs = self.work_secs;
            self.remaining_secs = self.total_secs;
            self.emit_display();
        }
    }

    /// Set the short break duration; applies the next time a short break
    /// starts. Minutes are clamped to a minimum of 1.
    pub fn set_short_break_duration(&mut self, minutes: u32) {
        self.short_break_secs = minutes.max(1) * 60;
    }

    /// Set the long break duration; applies the next time a long break
    /// starts. Minutes are clamped to a minimum of 1.
    pub fn set_long_break_duration(&mut self, minutes: u32) {
        self.long_break_secs = minutes.max(1) * 60;
    }

    /// Set how many work sessions precede a long break. Clamped to a
    /// minimum of 1.
    pub fn set_sessions_until_long_break(&mut self, sessions: u32) {
        self.sessions_until_long_break = sessions.max(1);
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn emit_display(&mut self) {
        let display = self.time_text();
        let fraction = self.progress();
        self.listeners.emit(&TimerEvent::TimeChanged {
            display,
            at: Utc::now(),
        });
        self.listeners.emit(&TimerEvent::ProgressChanged {
            fraction,
            at: Utc::now(),
        });
    }

    fn emit_state(&mut self, state: RunState) {
        self.listeners.emit(&TimerEvent::StateChanged {
            state,
            at: Utc::now(),
        });
    }

    fn complete_session(&mut self) {
        self.running = false;
        self.emit_state(RunState::Stopped);

        let finished = self.session;
        self.listeners.emit(&TimerEvent::SessionCompleted {
            session: finished,
            at: Utc::now(),
        });

        let next = if finished == SessionKind::Work {
            self.completed_sessions += 1;
            if self.completed_sessions % self.sessions_until_long_break == 0 {
                SessionKind::LongBreak
            } else {
                SessionKind::ShortBreak
            }
        } else {
            SessionKind::Work
        };
        self.switch_to_session(next);
    }

    fn switch_to_session(&mut self, session: SessionKind) {
        self.session = session;
        self.listeners.emit(&TimerEvent::SessionChanged {
            session,
            at: Utc::now(),
        });

        self.total_secs = match session {
            SessionKind::Work => self.work_secs,
            SessionKind::ShortBreak => self.short_break_secs,
            SessionKind::LongBreak => self.long_break_secs,
        };
        self.remaining_secs = self.total_secs;
        self.emit_display();
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}
