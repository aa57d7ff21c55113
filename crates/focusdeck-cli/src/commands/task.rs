//! Task management commands for CLI.
//!
//! Each invocation loads the list, applies one mutation (written through to
//! the database) and prints JSON. An unknown id is reported on stderr and
//! leaves stdout empty.

use clap::Subcommand;
use focusdeck_core::{Database, TaskStore};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        /// Task text (surrounding whitespace is trimmed)
        text: String,
    },
    /// List tasks in insertion order
    List,
    /// Flip a task between open and completed
    Toggle {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
    /// Print completed/total counts
    Stats,
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = TaskStore::load(Database::open()?);

    match action {
        TaskAction::Add { text } => match store.add(&text) {
            Some(task) => println!("{}", serde_json::to_string_pretty(&task)?),
            None => tracing::info!("empty task text ignored"),
        },
        TaskAction::List => {
            println!("{}", serde_json::to_string_pretty(store.tasks())?);
        }
        TaskAction::Toggle { id } => match store.toggle(&id) {
            Some(task) => println!("{}", serde_json::to_string_pretty(&task)?),
            None => tracing::warn!(%id, "task not found"),
        },
        TaskAction::Delete { id } => match store.delete(&id) {
            Some(task) => println!("{}", serde_json::to_string_pretty(&task)?),
            None => tracing::warn!(%id, "task not found"),
        },
        TaskAction::Stats => {
            println!("{}", serde_json::to_string_pretty(&store.stats())?);
        }
    }
    Ok(())
}
