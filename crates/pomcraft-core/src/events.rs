//! Event contract between the core components and the presentation layer.
//!
//! Every state change in a component produces an event. The presentation
//! layer registers callbacks via [`Listeners::subscribe`] and re-renders on
//! delivery. Delivery is synchronous and single-threaded: the component
//! mutates, persists, then invokes each subscriber in registration order
//! before the triggering call returns.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{RunState, SessionKind};

/// Callback registry owned by each component.
///
/// Subscribers receive a shared reference to the event; clone it if it needs
/// to outlive the callback.
pub struct Listeners<E> {
    subscribers: Vec<Box<dyn FnMut(&E)>>,
}

impl<E> Listeners<E> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Register a callback invoked for every event this component emits.
    pub fn subscribe(&mut self, callback: impl FnMut(&E) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    /// Deliver an event to every subscriber in registration order.
    pub fn emit(&mut self, event: &E) {
        for subscriber in &mut self.subscribers {
            subscriber(event);
        }
    }
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Events emitted by the timer engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TimerEvent {
    /// Formatted `MM:SS` display of the remaining time.
    TimeChanged {
        display: String,
        at: DateTime<Utc>,
    },
    /// Progress fraction within the current session, 0.0 at start,
    /// approaching 1.0 at expiry.
    ProgressChanged {
        fraction: f64,
        at: DateTime<Utc>,
    },
    /// The active session switched to a new kind.
    SessionChanged {
        session: SessionKind,
        at: DateTime<Utc>,
    },
    /// A session of the given kind ran to completion (or was skipped).
    SessionCompleted {
        session: SessionKind,
        at: DateTime<Utc>,
    },
    /// The run-state changed (running / paused / stopped).
    StateChanged {
        state: RunState,
        at: DateTime<Utc>,
    },
}

/// Events emitted by the task store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TaskEvent {
    /// The task list changed in any way; re-read via `tasks()`.
    ListChanged { at: DateTime<Utc> },
    TaskAdded { id: String, at: DateTime<Utc> },
    /// A toggle flipped a task to completed.
    TaskCompleted { id: String, at: DateTime<Utc> },
    TaskDeleted { id: String, at: DateTime<Utc> },
    /// A failure the user should see (persistence, external generators).
    Error { message: String, at: DateTime<Utc> },
}

/// Events emitted by the settings store.
///
/// Each setter emits its field-specific variant followed by the generic
/// `Changed`; unchanged writes emit nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SettingsEvent {
    WorkDurationChanged { minutes: u32, at: DateTime<Utc> },
    ShortBreakDurationChanged { minutes: u32, at: DateTime<Utc> },
    LongBreakDurationChanged { minutes: u32, at: DateTime<Utc> },
    SessionsUntilLongBreakChanged { sessions: u32, at: DateTime<Utc> },
    AutoStartBreaksChanged { enabled: bool, at: DateTime<Utc> },
    AutoStartPomodorosChanged { enabled: bool, at: DateTime<Utc> },
    NotificationSoundChanged { enabled: bool, at: DateTime<Utc> },
    ApiKeyChanged { key: String, at: DateTime<Utc> },
    ThemeChanged { theme: String, at: DateTime<Utc> },
    Changed { at: DateTime<Utc> },
}
