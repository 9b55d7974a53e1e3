/// Streak calculation over the completion index
///
/// A streak is a run of calendar-consecutive completed days for one habit.
/// Consecutiveness is decided with calendar arithmetic on day identifiers.

use serde::Serialize;

use crate::analytics::CompletionIndex;
use crate::domain::{DayId, Habit, HabitId};

/// Consecutive completed days ending at `as_of`
///
/// Walks backwards from `as_of` and stops at the first day that is not
/// completed. Zero when `as_of` itself is not completed.
pub fn current_streak(habit_id: &HabitId, as_of: DayId, index: &CompletionIndex) -> u32 {
    let mut streak = 0;
    let mut checking = Some(as_of);

    while let Some(day) = checking {
        if !index.is_completed(habit_id, day) {
            break;
        }
        streak += 1;
        checking = day.pred();
    }

    streak
}

/// Longest run of consecutive completed days inside `range`
pub fn best_streak(habit_id: &HabitId, range: &[DayId], index: &CompletionIndex) -> u32 {
    let mut best = 0;
    let mut run = 0;
    let mut previous: Option<DayId> = None;

    for &day in range {
        if index.is_completed(habit_id, day) {
            run = match previous {
                Some(prev) if day.follows(prev) => run + 1,
                _ => 1,
            };
            previous = Some(day);
            best = best.max(run);
        } else {
            run = 0;
            previous = None;
        }
    }

    best
}

/// Streak figures for one habit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitStreak {
    pub habit_id: HabitId,
    pub name: String,
    /// Run ending at the as-of day, not limited to the requested range
    pub current_streak: u32,
    /// Longest run inside the requested range
    pub best_streak: u32,
    pub last_completed: Option<DayId>,
}

impl HabitStreak {
    pub fn compute(habit: &Habit, as_of: DayId, range: &[DayId], index: &CompletionIndex) -> Self {
        Self {
            habit_id: habit.id.clone(),
            name: habit.display_name().to_string(),
            current_streak: current_streak(&habit.id, as_of, index),
            best_streak: best_streak(&habit.id, range, index),
            last_completed: index.last_completed(&habit.id),
        }
    }

    /// Short encouragement matching the current run
    pub fn motivational_message(&self) -> String {
        match self.current_streak {
            0 => "Ready to start your streak!".to_string(),
            1 => "Great start! One day down.".to_string(),
            2..=6 => format!("Nice work! {} days in a row.", self.current_streak),
            7..=29 => format!("Excellent! {} days strong.", self.current_streak),
            _ => format!("Incredible! {} days of consistency.", self.current_streak),
        }
    }
}
