use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::confetti::BurstScale;
use crate::timer::Mode;

/// Every state change in the widget produces an Event.
/// Front ends log or display them; the widget uses them to chain effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// The countdown reached zero. The opposite mode follows after the
    /// configured delay unless the user intervenes.
    SessionCompleted {
        mode: Mode,
        at: DateTime<Utc>,
    },
    ModeSwitched {
        from: Mode,
        to: Mode,
        automatic: bool,
        at: DateTime<Utc>,
    },
    TaskAdded {
        id: String,
        text: String,
        at: DateTime<Utc>,
    },
    TaskToggled {
        id: String,
        completed: bool,
        at: DateTime<Utc>,
    },
    TaskDeleted {
        id: String,
        at: DateTime<Utc>,
    },
    ConfettiBurst {
        scale: BurstScale,
        count: usize,
        at: DateTime<Utc>,
    },
    /// The frame loop stopped and no particles remain.
    ConfettiSettled {
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Snake-case name of the variant, used for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Event::TimerStarted { .. } => "timer_started",
            Event::TimerPaused { .. } => "timer_paused",
            Event::TimerReset { .. } => "timer_reset",
            Event::SessionCompleted { .. } => "session_completed",
            Event::ModeSwitched { .. } => "mode_switched",
            Event::TaskAdded { .. } => "task_added",
            Event::TaskToggled { .. } => "task_toggled",
            Event::TaskDeleted { .. } => "task_deleted",
            Event::ConfettiBurst { .. } => "confetti_burst",
            Event::ConfettiSettled { .. } => "confetti_settled",
        }
    }
}
