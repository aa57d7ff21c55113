//! Interactive focus session.
//!
//! Reads one command per line from stdin and drives the widget's one-second
//! tick and confetti frames from tokio intervals. Both intervals are only
//! polled while the widget says there is work for them.

use std::time::Duration;

use focusdeck_core::{Action, Config, Database, Event, Mode, Snapshot, View, Widget};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

const HELP: &str = "commands: start | pause | reset | work | break | add <text> | toggle <id> | rm <id> | list | help | quit";

#[derive(Debug, PartialEq)]
enum Command {
    Act(Action),
    List,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let need_arg = |what: &str| -> Result<String, String> {
        if rest.is_empty() {
            Err(format!("{word}: missing {what}"))
        } else {
            Ok(rest.to_string())
        }
    };

    let action = match word {
        "start" | "s" => Action::Start,
        "pause" | "p" => Action::Pause,
        "reset" => Action::Reset,
        "work" => Action::SwitchMode { mode: Mode::Work },
        "break" => Action::SwitchMode { mode: Mode::Break },
        "add" | "a" => Action::AddTask {
            text: rest.to_string(),
        },
        "toggle" | "done" | "t" => Action::ToggleTask {
            id: need_arg("task id")?,
            anchor: None,
        },
        "rm" | "delete" => Action::DeleteTask {
            id: need_arg("task id")?,
        },
        "list" | "ls" => return Ok(Command::List),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "q" | "exit" => return Ok(Command::Quit),
        "" => return Err(HELP.to_string()),
        other => return Err(format!("unknown command: {other}\n{HELP}")),
    };
    Ok(Command::Act(action))
}

/// Prints a status line per render.
#[derive(Default)]
struct TerminalView {
    last_line: Option<String>,
}

impl TerminalView {
    fn status_line(snapshot: &Snapshot) -> String {
        let state = if snapshot.running { "running" } else { "paused" };
        let mut line = format!(
            "[{}] {} {:>3.0}% {} | tasks {}",
            snapshot.mode, snapshot.clock, snapshot.progress_pct, state, snapshot.stats
        );
        if snapshot.particles > 0 {
            line.push_str(&format!(" | confetti {}", snapshot.particles));
        }
        line
    }

    fn list(&self, snapshot: &Snapshot) {
        if snapshot.tasks.is_empty() {
            println!("(no tasks)");
        }
        for task in &snapshot.tasks {
            let mark = if task.completed { 'x' } else { ' ' };
            println!("[{mark}] {}  {}", task.id, task.text);
        }
        println!("{}", snapshot.stats);
    }
}

impl View for TerminalView {
    fn render(&mut self, snapshot: &Snapshot) {
        let line = Self::status_line(snapshot);
        // Frames change only the particle count; skip identical lines.
        if self.last_line.as_deref() != Some(line.as_str()) {
            println!("{line}");
            self.last_line = Some(line);
        }
    }
}

fn log_events(events: impl IntoIterator<Item = Event>) {
    for event in events {
        match &event {
            Event::SessionCompleted { mode, .. } => println!("*** {mode} session complete ***"),
            Event::ModeSwitched {
                to,
                automatic: true,
                ..
            } => println!("switched to {to}"),
            Event::TaskAdded { id, text, .. } => println!("added {id}: {text}"),
            _ => {}
        }
        info!(event = event.name(), "{}", serde_json::to_string(&event).unwrap_or_default());
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(session(&config, db))
}

async fn session(config: &Config, db: Database) -> Result<(), Box<dyn std::error::Error>> {
    let mut widget = Widget::new(config, db);
    let mut view = TerminalView::default();
    println!("{HELP}");
    view.render(&widget.snapshot());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut frames = interval(FRAME_INTERVAL);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => println!("{HELP}"),
                    Ok(Command::List) => view.list(&widget.snapshot()),
                    Ok(Command::Act(action)) => {
                        let was_ticking = widget.needs_tick();
                        let was_animating = widget.is_animating();
                        log_events(widget.handle(action, &mut view));
                        // A fresh timer starts a full second from now.
                        if !was_ticking && widget.needs_tick() {
                            ticker.reset();
                        }
                        if !was_animating && widget.is_animating() {
                            frames.reset();
                        }
                    }
                    Err(msg) => eprintln!("{msg}"),
                }
            }
            _ = ticker.tick(), if widget.needs_tick() => {
                let was_animating = widget.is_animating();
                log_events(widget.tick());
                if !was_animating && widget.is_animating() {
                    frames.reset();
                }
                view.render(&widget.snapshot());
            }
            _ = frames.tick(), if widget.is_animating() => {
                if let Some(event) = widget.frame() {
                    log_events([event]);
                    view.render(&widget.snapshot());
                }
            }
        }
    }
    Ok(())
}
