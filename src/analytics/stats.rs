/// Completion rates over a date range
///
/// Every function here is total: empty habit lists and empty ranges give a
/// rate of 0 instead of an error.

use serde::Serialize;

use crate::analytics::CompletionIndex;
use crate::domain::{DayId, Habit, HabitId};

/// `round(100 * completed / possible)`, rounding halves up
///
/// Returns 0 when nothing was possible.
pub fn rate_percent(completed: usize, possible: usize) -> u32 {
    if possible == 0 {
        return 0;
    }
    let completed = completed.min(possible) as u64;
    let possible = possible as u64;
    ((200 * completed + possible) / (2 * possible)) as u32
}

/// Share of (habit, day) slots in `range` that were completed
pub fn completion_rate(range: &[DayId], habits: &[Habit], index: &CompletionIndex) -> u32 {
    let possible = habits.len() * range.len();
    let completed: usize = habits
        .iter()
        .map(|habit| index.completed_in(&habit.id, range))
        .sum();
    rate_percent(completed, possible)
}

/// Completion rate for a single habit
pub fn habit_completion_rate(habit_id: &HabitId, range: &[DayId], index: &CompletionIndex) -> u32 {
    rate_percent(index.completed_in(habit_id, range), range.len())
}

/// Change in completion rate from `prior` to `current`, in percentage points
pub fn period_delta(
    current: &[DayId],
    prior: &[DayId],
    habits: &[Habit],
    index: &CompletionIndex,
) -> i32 {
    completion_rate(current, habits, index) as i32 - completion_rate(prior, habits, index) as i32
}

/// Completion totals for one day of a range
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayTotal {
    pub date: DayId,
    pub completed: usize,
    pub total: usize,
    pub rate: u32,
}

/// One entry per day of `range`, counting how many habits were completed
pub fn daily_breakdown(range: &[DayId], habits: &[Habit], index: &CompletionIndex) -> Vec<DayTotal> {
    range
        .iter()
        .map(|&date| {
            let completed = habits
                .iter()
                .filter(|habit| index.is_completed(&habit.id, date))
                .count();
            DayTotal {
                date,
                completed,
                total: habits.len(),
                rate: rate_percent(completed, habits.len()),
            }
        })
        .collect()
}
