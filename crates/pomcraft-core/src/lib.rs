//! # Pomcraft Core Library
//!
//! This library provides the core business logic for the Pomcraft Pomodoro
//! timer: a tick-driven timer state machine, a JSON-file-backed task list,
//! and a JSON-file-backed settings store. The CLI binary (and any GUI shell)
//! is a thin presentation layer over these three components.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A state machine that requires the caller to invoke
//!   `tick()` once per wall-clock second for countdown progress
//! - **Storage**: JSON-based task and settings persistence under the
//!   Pomcraft data directory
//! - **Events**: Each component owns a listener registry; the presentation
//!   layer subscribes callbacks per component and re-renders on change
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`TaskStore`]: Ordered task list persistence
//! - [`SettingsStore`]: Application settings management

pub mod error;
pub mod events;
pub mod storage;
pub mod timer;

pub use error::CoreError;
pub use events::{Listeners, SettingsEvent, TaskEvent, TimerEvent};
pub use storage::{Settings, SettingsStore, Task, TaskSeed, TaskStore};
pub use timer::{RunState, SessionKind, TimerEngine};
