/// Per-habit sets of completed days
///
/// The index is always rebuilt from the full record list. It is never
/// patched record by record, so a snapshot maps to exactly one index.

use std::collections::{BTreeSet, HashMap};

use crate::domain::{CompletionRecord, DayId, HabitId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionIndex {
    by_habit: HashMap<HabitId, BTreeSet<DayId>>,
}

impl CompletionIndex {
    /// Fold records in input order; for a repeated `(habit, date)` the last
    /// record decides whether the day counts as completed.
    pub fn build<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a CompletionRecord>,
    {
        let mut by_habit: HashMap<HabitId, BTreeSet<DayId>> = HashMap::new();

        for record in records {
            if record.completed {
                by_habit
                    .entry(record.habit_id.clone())
                    .or_default()
                    .insert(record.date);
            } else if let Some(days) = by_habit.get_mut(&record.habit_id) {
                days.remove(&record.date);
                if days.is_empty() {
                    by_habit.remove(&record.habit_id);
                }
            }
        }

        Self { by_habit }
    }

    pub fn is_completed(&self, habit_id: &HabitId, day: DayId) -> bool {
        self.by_habit
            .get(habit_id)
            .is_some_and(|days| days.contains(&day))
    }

    /// Completed days for a habit in ascending order
    pub fn completed_days(&self, habit_id: &HabitId) -> impl Iterator<Item = DayId> + '_ {
        self.by_habit
            .get(habit_id)
            .into_iter()
            .flat_map(|days| days.iter().copied())
    }

    /// Number of days in `range` the habit was completed
    pub fn completed_in(&self, habit_id: &HabitId, range: &[DayId]) -> usize {
        match self.by_habit.get(habit_id) {
            Some(days) => range.iter().filter(|day| days.contains(day)).count(),
            None => 0,
        }
    }

    pub fn last_completed(&self, habit_id: &HabitId) -> Option<DayId> {
        self.by_habit
            .get(habit_id)
            .and_then(|days| days.iter().next_back().copied())
    }

    pub fn total_completions(&self, habit_id: &HabitId) -> usize {
        self.by_habit.get(habit_id).map_or(0, BTreeSet::len)
    }

    /// Number of habits with at least one completed day
    pub fn habit_count(&self) -> usize {
        self.by_habit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_habit.is_empty()
    }
}

/// Build the completion index for a record list
pub fn build_index(records: &[CompletionRecord]) -> CompletionIndex {
    CompletionIndex::build(records)
}
