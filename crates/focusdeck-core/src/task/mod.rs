//! Task list backed by a key-value store.

mod store;

use serde::{Deserialize, Serialize};

pub use store::{TaskStore, TASKS_KEY};

/// One entry in the task list.
///
/// The serialized shape `{id, text, completed}` is the persisted format;
/// anything else on disk is treated as "no saved tasks".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Creation time in epoch milliseconds, as a decimal string.
    pub id: String,
    pub text: String,
    pub completed: bool,
}

/// Completed and total task counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskStats {
    pub completed: usize,
    pub total: usize,
}

impl std::fmt::Display for TaskStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.completed, self.total)
    }
}
