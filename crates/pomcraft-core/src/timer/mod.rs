mod engine;

pub use engine::{RunState, SessionKind, TimerEngine};
