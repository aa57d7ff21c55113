//! The widget: countdown, task list and confetti behind one dispatch point.
//!
//! A front end translates each user gesture into an [`Action`], hands it to
//! [`Widget::handle`] and gets exactly one render call back. Timers are the
//! front end's business: it calls [`Widget::tick`] once per second while
//! [`Widget::needs_tick`] holds and [`Widget::frame`] once per display frame
//! while [`Widget::is_animating`] holds.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::confetti::{BurstScale, ConfettiAnimation, Point, Viewport};
use crate::events::Event;
use crate::storage::{Config, ConfettiConfig, KvStore};
use crate::task::{Task, TaskStats, TaskStore};
use crate::timer::{format_clock, Countdown, Mode, ProgressRing};

/// One user gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Start,
    Pause,
    Reset,
    SwitchMode { mode: Mode },
    AddTask { text: String },
    /// `anchor` is the task row's top-left corner on screen, if known.
    ToggleTask { id: String, anchor: Option<Point> },
    DeleteTask { id: String },
    Resize { viewport: Viewport },
}

/// Everything a view needs to draw the widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub clock: String,
    pub mode: Mode,
    pub running: bool,
    pub remaining_secs: u64,
    pub progress_pct: f64,
    pub dash_offset: f64,
    pub tasks: Vec<Task>,
    pub stats: TaskStats,
    pub particles: usize,
}

pub trait View {
    fn render(&mut self, snapshot: &Snapshot);
}

pub struct Widget<S: KvStore> {
    countdown: Countdown,
    tasks: TaskStore<S>,
    confetti: ConfettiAnimation,
    ring: ProgressRing,
    bursts: ConfettiConfig,
}

impl<S: KvStore> Widget<S> {
    /// Build a widget from config, restoring tasks from `kv`.
    pub fn new(config: &Config, kv: S) -> Self {
        let confetti = ConfettiAnimation::new(config.display.viewport(), config.confetti.physics());
        Self::with_confetti(config, kv, confetti)
    }

    /// Build a widget around an existing animation (e.g. a seeded one).
    pub fn with_confetti(config: &Config, kv: S, confetti: ConfettiAnimation) -> Self {
        Self {
            countdown: Countdown::new(config.timer.durations()),
            tasks: TaskStore::load(kv),
            confetti,
            ring: config.display.ring(),
            bursts: config.confetti.clone(),
        }
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn tasks(&self) -> &TaskStore<S> {
        &self.tasks
    }

    pub fn confetti(&self) -> &ConfettiAnimation {
        &self.confetti
    }

    pub fn needs_tick(&self) -> bool {
        self.countdown.needs_tick()
    }

    pub fn is_animating(&self) -> bool {
        self.confetti.is_running()
    }

    /// Apply one action. Exactly one component is mutated; a checked-off
    /// task additionally fires a small burst.
    pub fn dispatch(&mut self, action: Action) -> Vec<Event> {
        debug!(?action, "dispatch");
        let mut events = Vec::new();
        match action {
            Action::Start => events.extend(self.countdown.start()),
            Action::Pause => events.extend(self.countdown.pause()),
            Action::Reset => events.extend(self.countdown.reset()),
            Action::SwitchMode { mode } => events.extend(self.countdown.switch_mode(mode)),
            Action::AddTask { text } => {
                if let Some(task) = self.tasks.add(&text) {
                    events.push(Event::TaskAdded {
                        id: task.id,
                        text: task.text,
                        at: Utc::now(),
                    });
                }
            }
            Action::ToggleTask { id, anchor } => {
                if let Some(task) = self.tasks.toggle(&id) {
                    let completed = task.completed;
                    events.push(Event::TaskToggled {
                        id: task.id,
                        completed,
                        at: Utc::now(),
                    });
                    if completed {
                        let offset = self.bursts.anchor_offset;
                        let origin = anchor
                            .map(|a| a.offset(offset, offset))
                            .unwrap_or_else(|| self.confetti.viewport().center());
                        events.push(self.burst(origin, self.bursts.task_particles, BurstScale::Small));
                    }
                }
            }
            Action::DeleteTask { id } => {
                if let Some(task) = self.tasks.delete(&id) {
                    events.push(Event::TaskDeleted {
                        id: task.id,
                        at: Utc::now(),
                    });
                }
            }
            Action::Resize { viewport } => self.confetti.resize(viewport),
        }
        events
    }

    /// Dispatch, then render once.
    pub fn handle<V: View + ?Sized>(&mut self, action: Action, view: &mut V) -> Vec<Event> {
        let events = self.dispatch(action);
        view.render(&self.snapshot());
        events
    }

    /// One second passed. A completed session fires the large burst from
    /// the bottom centre of the viewport.
    pub fn tick(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if let Some(event) = self.countdown.tick() {
            let completed = matches!(event, Event::SessionCompleted { .. });
            events.push(event);
            if completed {
                let origin = self.confetti.viewport().bottom_center();
                events.push(self.burst(origin, self.bursts.session_particles, BurstScale::Large));
            }
        }
        events
    }

    /// One display frame. Returns `ConfettiSettled` when the loop stops.
    pub fn frame(&mut self) -> Option<Event> {
        if !self.confetti.is_running() {
            return None;
        }
        if self.confetti.frame() {
            return None;
        }
        Some(Event::ConfettiSettled { at: Utc::now() })
    }

    pub fn snapshot(&self) -> Snapshot {
        let progress_pct = self.countdown.progress_pct();
        Snapshot {
            clock: format_clock(self.countdown.remaining_secs()),
            mode: self.countdown.mode(),
            running: self.countdown.is_running(),
            remaining_secs: self.countdown.remaining_secs(),
            progress_pct,
            dash_offset: self.ring.dash_offset(progress_pct),
            tasks: self.tasks.tasks().to_vec(),
            stats: self.tasks.stats(),
            particles: self.confetti.particles().len(),
        }
    }

    fn burst(&mut self, origin: Point, count: usize, scale: BurstScale) -> Event {
        self.confetti.burst(origin, count, scale);
        Event::ConfettiBurst {
            scale,
            count,
            at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confetti::Physics;
    use crate::storage::MemoryKv;

    fn widget() -> Widget<MemoryKv> {
        let mut config = Config::default();
        config.timer.work_minutes = 1;
        config.timer.break_minutes = 1;
        let confetti =
            ConfettiAnimation::with_seed(config.display.viewport(), Physics::default(), 1);
        Widget::with_confetti(&config, MemoryKv::new(), confetti)
    }

    #[derive(Default)]
    struct RecordingView {
        renders: Vec<Snapshot>,
    }

    impl View for RecordingView {
        fn render(&mut self, snapshot: &Snapshot) {
            self.renders.push(snapshot.clone());
        }
    }

    #[test]
    fn each_action_renders_once() {
        let mut w = widget();
        let mut view = RecordingView::default();
        w.handle(Action::Start, &mut view);
        w.handle(
            Action::AddTask {
                text: "focus".into(),
            },
            &mut view,
        );
        assert_eq!(view.renders.len(), 2);
        assert!(view.renders[0].running);
        assert_eq!(view.renders[1].stats, TaskStats { completed: 0, total: 1 });
    }

    #[test]
    fn session_completion_fires_large_burst() {
        let mut w = widget();
        w.dispatch(Action::Start);
        let events: Vec<Event> = (0..60).flat_map(|_| w.tick()).collect();
        assert!(matches!(events[0], Event::SessionCompleted { mode: Mode::Work, .. }));
        assert!(matches!(
            events[1],
            Event::ConfettiBurst {
                scale: BurstScale::Large,
                count: 150,
                ..
            }
        ));
        assert!(w.is_animating());
        assert_eq!(w.snapshot().particles, 150);
    }

    #[test]
    fn checking_off_a_task_fires_small_burst_at_anchor() {
        let mut w = widget();
        let id = match &w.dispatch(Action::AddTask { text: "x".into() })[0] {
            Event::TaskAdded { id, .. } => id.clone(),
            other => panic!("unexpected {other:?}"),
        };
        let events = w.dispatch(Action::ToggleTask {
            id: id.clone(),
            anchor: Some(Point::new(10.0, 10.0)),
        });
        assert_eq!(events.len(), 2);
        assert!(w
            .confetti()
            .particles()
            .iter()
            .all(|p| p.x == 30.0 && p.y == 30.0));
        assert_eq!(w.confetti().particles().len(), 30);

        let events = w.dispatch(Action::ToggleTask { id, anchor: None });
        assert_eq!(events.len(), 1, "un-checking does not burst");
    }

    #[test]
    fn frame_reports_settling_once() {
        let mut w = widget();
        let id = match &w.dispatch(Action::AddTask { text: "x".into() })[0] {
            Event::TaskAdded { id, .. } => id.clone(),
            other => panic!("unexpected {other:?}"),
        };
        w.dispatch(Action::ToggleTask { id, anchor: None });
        let settled = (0..10_000).filter_map(|_| w.frame()).count();
        assert_eq!(settled, 1);
        assert!(!w.is_animating());
        assert_eq!(w.snapshot().particles, 0);
    }

    #[test]
    fn snapshot_maps_progress_to_ring() {
        let w = widget();
        let snap = w.snapshot();
        assert_eq!(snap.clock, "01:00");
        assert_eq!(snap.progress_pct, 100.0);
        assert_eq!(snap.dash_offset, 0.0);
    }

    #[test]
    fn unknown_ids_produce_no_events() {
        let mut w = widget();
        assert!(w
            .dispatch(Action::ToggleTask {
                id: "missing".into(),
                anchor: None
            })
            .is_empty());
        assert!(w
            .dispatch(Action::DeleteTask {
                id: "missing".into()
            })
            .is_empty());
    }

    #[test]
    fn resize_moves_session_burst_origin() {
        let mut w = widget();
        w.dispatch(Action::Resize {
            viewport: Viewport::new(200.0, 100.0),
        });
        w.dispatch(Action::Start);
        for _ in 0..60 {
            w.tick();
        }
        assert!(w
            .confetti()
            .particles()
            .iter()
            .all(|p| p.x == 100.0 && p.y == 100.0));
    }
}
