//! # Focusdeck Core Library
//!
//! Core logic for the Focusdeck pomodoro widget. Front ends (the bundled CLI
//! or any other shell) own the timers and the drawing; this crate owns the
//! state.
//!
//! ## Architecture
//!
//! - **Countdown**: a tick-driven work/break state machine; the caller invokes
//!   `tick()` once per second
//! - **Task Store**: an ordered task list written through to a key-value store
//! - **Confetti**: particle bursts advanced once per display frame
//! - **Widget**: the dispatch point tying user actions to the above
//! - **Storage**: SQLite key-value table and TOML configuration
//!
//! ## Key Components
//!
//! - [`Countdown`]: Work/break timer
//! - [`TaskStore`]: Persistent task list
//! - [`ConfettiAnimation`]: Particle frame loop
//! - [`Widget`]: Action dispatch and snapshots for views
//! - [`Config`]: Application configuration management

pub mod confetti;
pub mod error;
pub mod events;
pub mod storage;
pub mod task;
pub mod timer;
pub mod widget;

pub use confetti::{BurstScale, ConfettiAnimation, Particle, Physics, Point, Viewport};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use storage::{Config, Database, KvStore, MemoryKv};
pub use task::{Task, TaskStats, TaskStore};
pub use timer::{Countdown, Durations, Mode, ProgressRing};
pub use widget::{Action, Snapshot, View, Widget};
