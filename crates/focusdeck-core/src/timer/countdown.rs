//! Work/break countdown.
//!
//! The countdown is a tick-driven state machine. It owns no timer of its own:
//! the host calls `tick()` once per second while `needs_tick()` is true and
//! cancels its interval otherwise.
//!
//! ## State Transitions
//!
//! ```text
//! Paused -> Running -> (Paused | Completed) ; Completed -(delay)-> Paused (opposite mode)
//! ```
//!
//! A manual `start`, `reset` or mode switch during the completion delay
//! cancels the pending automatic switch.

use chrono::Utc;
use tracing::{debug, info};

use super::mode::{Durations, Mode};
use crate::events::Event;

/// Automatic mode switch scheduled after a session completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSwitch {
    pub to: Mode,
    /// Ticks left before the switch happens.
    pub remaining_delay_secs: u64,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    durations: Durations,
    mode: Mode,
    remaining_secs: u64,
    running: bool,
    pending_switch: Option<PendingSwitch>,
}

impl Countdown {
    /// New countdown in work mode with the full work duration, not running.
    pub fn new(durations: Durations) -> Self {
        Self {
            durations,
            mode: Mode::Work,
            remaining_secs: durations.total_secs(Mode::Work),
            running: false,
            pending_switch: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.durations.total_secs(self.mode)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn durations(&self) -> Durations {
        self.durations
    }

    pub fn pending_switch(&self) -> Option<PendingSwitch> {
        self.pending_switch
    }

    /// Whether the host should keep its one-second timer alive.
    pub fn needs_tick(&self) -> bool {
        self.running || self.pending_switch.is_some()
    }

    /// 0.0 ..= 100.0, the share of the session still remaining.
    pub fn progress_pct(&self) -> f64 {
        self.remaining_secs as f64 / self.total_secs() as f64 * 100.0
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        if let Some(pending) = self.pending_switch.take() {
            debug!(to = %pending.to, "start during completion delay, switching now");
            self.mode = pending.to;
            self.remaining_secs = self.total_secs();
        }
        self.running = true;
        debug!(mode = %self.mode, remaining = self.remaining_secs, "timer started");
        Some(Event::TimerStarted {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        debug!(remaining = self.remaining_secs, "timer paused");
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.pause();
        self.pending_switch = None;
        self.remaining_secs = self.total_secs();
        Some(Event::TimerReset {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Switch to `mode` with a full session. Switching to the current mode
    /// does nothing at all.
    pub fn switch_mode(&mut self, mode: Mode) -> Option<Event> {
        if mode == self.mode {
            return None;
        }
        self.pending_switch = None;
        Some(self.apply_switch(mode, false))
    }

    /// One one-second step.
    ///
    /// Returns `Some(Event::SessionCompleted)` when the countdown reaches zero
    /// and `Some(Event::ModeSwitched)` when a pending automatic switch fires.
    pub fn tick(&mut self) -> Option<Event> {
        if self.running {
            self.remaining_secs = self.remaining_secs.saturating_sub(1);
            if self.remaining_secs == 0 {
                self.pause();
                self.pending_switch = Some(PendingSwitch {
                    to: self.mode.opposite(),
                    remaining_delay_secs: self.durations.switch_delay_secs(),
                });
                info!(mode = %self.mode, "session completed");
                return Some(Event::SessionCompleted {
                    mode: self.mode,
                    at: Utc::now(),
                });
            }
            return None;
        }

        let pending = self.pending_switch.as_mut()?;
        pending.remaining_delay_secs = pending.remaining_delay_secs.saturating_sub(1);
        if pending.remaining_delay_secs > 0 {
            return None;
        }
        let to = pending.to;
        self.pending_switch = None;
        Some(self.apply_switch(to, true))
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn apply_switch(&mut self, to: Mode, automatic: bool) -> Event {
        self.pause();
        let from = self.mode;
        self.mode = to;
        self.remaining_secs = self.total_secs();
        debug!(%from, %to, automatic, "mode switched");
        Event::ModeSwitched {
            from,
            to,
            automatic,
            at: Utc::now(),
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(Durations::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short() -> Countdown {
        Countdown::new(Durations {
            work_secs: 3,
            break_secs: 2,
            auto_switch_delay_secs: 2,
        })
    }

    #[test]
    fn starts_in_work_mode_with_full_duration() {
        let cd = Countdown::default();
        assert_eq!(cd.mode(), Mode::Work);
        assert_eq!(cd.remaining_secs(), 25 * 60);
        assert!(!cd.is_running());
        assert!(!cd.needs_tick());
    }

    #[test]
    fn start_and_pause_are_idempotent() {
        let mut cd = short();
        assert!(cd.start().is_some());
        assert!(cd.start().is_none());
        assert!(cd.pause().is_some());
        assert!(cd.pause().is_none());
    }

    #[test]
    fn ticks_only_count_while_running() {
        let mut cd = short();
        assert!(cd.tick().is_none());
        assert_eq!(cd.remaining_secs(), 3);
        cd.start();
        cd.tick();
        assert_eq!(cd.remaining_secs(), 2);
    }

    #[test]
    fn completes_exactly_once_after_total_ticks() {
        let mut cd = short();
        cd.start();
        let completions = (0..cd.total_secs())
            .filter_map(|_| cd.tick())
            .filter(|e| matches!(e, Event::SessionCompleted { .. }))
            .count();
        assert_eq!(completions, 1);
        assert_eq!(cd.remaining_secs(), 0);
        assert!(!cd.is_running());
        assert_eq!(
            cd.pending_switch(),
            Some(PendingSwitch {
                to: Mode::Break,
                remaining_delay_secs: 2
            })
        );
    }

    #[test]
    fn auto_switch_fires_after_delay() {
        let mut cd = short();
        cd.start();
        for _ in 0..3 {
            cd.tick();
        }
        assert!(cd.tick().is_none());
        match cd.tick() {
            Some(Event::ModeSwitched {
                from, to, automatic, ..
            }) => {
                assert_eq!(from, Mode::Work);
                assert_eq!(to, Mode::Break);
                assert!(automatic);
            }
            other => panic!("expected ModeSwitched, got {other:?}"),
        }
        assert_eq!(cd.mode(), Mode::Break);
        assert_eq!(cd.remaining_secs(), 2);
        assert!(!cd.is_running());
        assert!(!cd.needs_tick());
    }

    #[test]
    fn one_tick_delay_switches_on_first_tick_after_completion() {
        let mut cd = Countdown::new(Durations {
            work_secs: 2,
            break_secs: 5,
            auto_switch_delay_secs: 1,
        });
        cd.start();
        assert!(cd.tick().is_none());
        assert!(matches!(cd.tick(), Some(Event::SessionCompleted { .. })));
        assert!(matches!(
            cd.tick(),
            Some(Event::ModeSwitched {
                to: Mode::Break,
                automatic: true,
                ..
            })
        ));
        assert_eq!(cd.remaining_secs(), 5);
    }

    #[test]
    fn zero_delay_waits_one_tick() {
        let mut cd = Countdown::new(Durations {
            work_secs: 1,
            break_secs: 5,
            auto_switch_delay_secs: 0,
        });
        cd.start();
        assert!(matches!(cd.tick(), Some(Event::SessionCompleted { .. })));
        assert_eq!(cd.pending_switch().map(|p| p.remaining_delay_secs), Some(1));
        assert!(matches!(cd.tick(), Some(Event::ModeSwitched { .. })));
    }

    #[test]
    fn manual_switch_cancels_pending_auto_switch() {
        let mut cd = short();
        cd.start();
        for _ in 0..3 {
            cd.tick();
        }
        cd.switch_mode(Mode::Break);
        cd.switch_mode(Mode::Work);
        assert!(cd.pending_switch().is_none());
        for _ in 0..5 {
            assert!(cd.tick().is_none());
        }
        assert_eq!(cd.mode(), Mode::Work);
        assert_eq!(cd.remaining_secs(), 3);
    }

    #[test]
    fn reset_cancels_pending_auto_switch() {
        let mut cd = short();
        cd.start();
        for _ in 0..3 {
            cd.tick();
        }
        cd.reset();
        assert!(cd.pending_switch().is_none());
        assert_eq!(cd.mode(), Mode::Work);
        assert_eq!(cd.remaining_secs(), 3);
    }

    #[test]
    fn start_during_delay_applies_switch_immediately() {
        let mut cd = short();
        cd.start();
        for _ in 0..3 {
            cd.tick();
        }
        cd.start();
        assert_eq!(cd.mode(), Mode::Break);
        assert_eq!(cd.remaining_secs(), 2);
        assert!(cd.is_running());
    }

    #[test]
    fn switching_to_current_mode_is_noop() {
        let mut cd = Countdown::default();
        cd.start();
        for _ in 0..(25 * 60 - 120) {
            cd.tick();
        }
        assert_eq!(cd.remaining_secs(), 120);
        assert!(cd.switch_mode(Mode::Work).is_none());
        assert_eq!(cd.remaining_secs(), 120);
        assert!(cd.is_running());
    }

    #[test]
    fn switch_mode_pauses_and_resets() {
        let mut cd = short();
        cd.start();
        cd.tick();
        assert!(cd.switch_mode(Mode::Break).is_some());
        assert!(!cd.is_running());
        assert_eq!(cd.remaining_secs(), 2);
        assert_eq!(cd.total_secs(), 2);
    }

    #[test]
    fn reset_restores_full_duration_and_pauses() {
        let mut cd = short();
        cd.start();
        cd.tick();
        cd.reset();
        assert!(!cd.is_running());
        assert_eq!(cd.remaining_secs(), 3);
    }

    #[test]
    fn progress_tracks_remaining_share() {
        let mut cd = Countdown::new(Durations {
            work_secs: 4,
            break_secs: 1,
            auto_switch_delay_secs: 2,
        });
        assert_eq!(cd.progress_pct(), 100.0);
        cd.start();
        cd.tick();
        assert_eq!(cd.progress_pct(), 75.0);
    }

    #[test]
    fn remaining_never_exceeds_total() {
        let mut cd = short();
        cd.start();
        for _ in 0..20 {
            cd.tick();
            assert!(cd.remaining_secs() <= cd.total_secs());
            if !cd.needs_tick() {
                cd.start();
            }
        }
    }
}
