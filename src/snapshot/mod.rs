/// Snapshots of habit data handed over by the sync service
///
/// The engine never talks to the backing store. A caller fetches habits and
/// completion records, wraps them in a `Snapshot`, and the engine derives
/// everything from that immutable value.

pub mod json;

pub use json::*;

use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analytics::CompletionIndex;
use crate::domain::{CompletionRecord, Habit, HabitId};

/// Errors that can occur while loading a snapshot
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Habits and completion records for one user at one moment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Snapshot {
    pub habits: Vec<Habit>,
    pub records: Vec<CompletionRecord>,
}

impl Snapshot {
    pub fn new(habits: Vec<Habit>, records: Vec<CompletionRecord>) -> Self {
        Self { habits, records }
    }

    /// Build the completion index for this snapshot's records
    pub fn index(&self) -> CompletionIndex {
        CompletionIndex::build(&self.records)
    }

    pub fn habit(&self, habit_id: &HabitId) -> Option<&Habit> {
        self.habits.iter().find(|h| &h.id == habit_id)
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty() && self.records.is_empty()
    }
}

/// Trait for anything that can produce a snapshot
///
/// Lets the server preload from a file today and from another source later
/// without changing the engine.
pub trait SnapshotSource {
    fn load(&self) -> Result<Snapshot, SnapshotError>;
}
