//! Write-through task store.
//!
//! Every mutation re-serializes the whole list and writes it under
//! [`TASKS_KEY`]. A failed write is logged and otherwise ignored: the
//! in-memory list stays authoritative for the rest of the session.

use chrono::Utc;
use tracing::{debug, warn};

use super::{Task, TaskStats};
use crate::storage::KvStore;

/// Key the task list is stored under.
pub const TASKS_KEY: &str = "pomodoro_tasks";

pub struct TaskStore<S: KvStore> {
    kv: S,
    tasks: Vec<Task>,
    /// Highest id handed out (or loaded), in epoch milliseconds.
    last_id_ms: i64,
}

impl<S: KvStore> TaskStore<S> {
    /// Restore the list from `kv`.
    ///
    /// Missing, unreadable or malformed data yields an empty list.
    pub fn load(kv: S) -> Self {
        let tasks = match kv.get(TASKS_KEY) {
            Ok(Some(json)) => serde_json::from_str::<Vec<Task>>(&json).unwrap_or_else(|e| {
                warn!(error = %e, "ignoring malformed saved tasks");
                Vec::new()
            }),
            Ok(None) => {
                debug!("no saved tasks");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "could not read saved tasks");
                Vec::new()
            }
        };
        let last_id_ms = tasks
            .iter()
            .filter_map(|t| t.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        debug!(count = tasks.len(), "tasks loaded");
        Self {
            kv,
            tasks,
            last_id_ms,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats {
            completed: self.tasks.iter().filter(|t| t.completed).count(),
            total: self.tasks.len(),
        }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn into_kv(self) -> S {
        self.kv
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Append a task. Text is trimmed; blank text is ignored.
    pub fn add(&mut self, text: &str) -> Option<Task> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let task = Task {
            id: self.next_id(),
            text: text.to_string(),
            completed: false,
        };
        self.tasks.push(task.clone());
        self.persist();
        Some(task)
    }

    /// Flip `completed`. Returns the updated task, or `None` for an unknown id.
    pub fn toggle(&mut self, id: &str) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        let task = task.clone();
        self.persist();
        Some(task)
    }

    /// Remove a task. Returns it, or `None` for an unknown id.
    pub fn delete(&mut self, id: &str) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        let task = self.tasks.remove(index);
        self.persist();
        Some(task)
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Millisecond timestamp, bumped past the last id so ids stay unique
    /// when several tasks land in the same millisecond.
    ///
    /// A saved id at `i64::MAX` leaves no room above it; the search then
    /// restarts from the clock and walks up to the first free value.
    fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        let mut candidate = now.max(self.last_id_ms.saturating_add(1));
        if self.id_taken(candidate) {
            candidate = now;
            while self.id_taken(candidate) {
                candidate = candidate.saturating_add(1);
            }
        }
        self.last_id_ms = self.last_id_ms.max(candidate);
        candidate.to_string()
    }

    fn id_taken(&self, id: i64) -> bool {
        self.tasks.iter().any(|t| t.id.parse::<i64>() == Ok(id))
    }

    fn persist(&mut self) {
        let json = match serde_json::to_string(&self.tasks) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "could not serialize tasks");
                return;
            }
        };
        if let Err(e) = self.kv.set(TASKS_KEY, &json) {
            warn!(error = %e, "could not save tasks, keeping in-memory state");
        }
    }
}
