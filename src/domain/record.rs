/// Completion records as stored by the external sync service
///
/// One record asserts that a habit was, or was not, completed on a day.
/// The store upserts on `(habitId, date)`, but stale caches can still hand
/// us duplicates, which the completion index resolves.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{DayId, DomainError, HabitId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    pub habit_id: HabitId,
    pub date: DayId,
    pub completed: bool,
}

impl CompletionRecord {
    pub fn new(habit_id: impl Into<HabitId>, date: DayId, completed: bool) -> Self {
        Self {
            habit_id: habit_id.into(),
            date,
            completed,
        }
    }

    /// Build a record from raw store fields, validating the date string
    pub fn parse(habit_id: &str, date: &str, completed: bool) -> Result<Self, DomainError> {
        Ok(Self {
            habit_id: HabitId::new(habit_id),
            date: date.parse()?,
            completed,
        })
    }
}
