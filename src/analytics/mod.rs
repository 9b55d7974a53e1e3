/// Analytics engine for completion statistics and streaks
///
/// This module turns a snapshot of habits and completion records into the
/// numbers the dashboard shows: completion rates, period-over-period
/// deltas, per-day totals and current/best streaks.

pub mod index;
pub mod stats;
pub mod streak;

pub use index::*;
pub use stats::*;
pub use streak::*;

use serde::Serialize;

use crate::config::EngineConfig;
use crate::domain::{period_label, range_for, DayId, DomainError, Habit, HabitId, ViewMode};

/// Progress of one habit over a report's range
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitProgress {
    pub habit_id: HabitId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub completed_days: usize,
    pub completion_rate: u32,
    /// Run ending at the as-of day; may reach back before `start`, so it can
    /// exceed `best_streak`
    pub current_streak: u32,
    /// Longest run inside the report's range
    pub best_streak: u32,
    pub last_completed: Option<DayId>,
}

/// Everything a dashboard needs for one view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressReport {
    pub mode: &'static str,
    pub label: String,
    pub start: DayId,
    pub end: DayId,
    pub days: usize,
    pub as_of: DayId,
    pub completion_rate: u32,
    pub prior_completion_rate: u32,
    /// Percentage points gained (+) or lost (-) against the prior period
    pub delta: i32,
    pub habits: Vec<HabitProgress>,
    pub daily: Vec<DayTotal>,
}

/// Analytics engine for processing habit data
///
/// Holds only configuration; every report is rederived from the habits and
/// index passed in.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    config: EngineConfig,
}

impl AnalyticsEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build the full report for a view
    ///
    /// The prior period is the same-length range ending the day before the
    /// current one starts. Current streaks are measured back from `as_of`.
    pub fn report(
        &self,
        habits: &[Habit],
        index: &CompletionIndex,
        mode: ViewMode,
        anchor: DayId,
        as_of: DayId,
    ) -> Result<ProgressReport, DomainError> {
        let range = range_for(mode, anchor, &self.config)?;
        let prior = range.preceding()?;

        let completion_rate = stats::completion_rate(&range, habits, index);
        let prior_completion_rate = stats::completion_rate(&prior, habits, index);

        let habit_progress = habits
            .iter()
            .map(|habit| HabitProgress {
                habit_id: habit.id.clone(),
                name: habit.display_name().to_string(),
                color: habit.color.clone(),
                completed_days: index.completed_in(&habit.id, &range),
                completion_rate: habit_completion_rate(&habit.id, &range, index),
                current_streak: current_streak(&habit.id, as_of, index),
                best_streak: best_streak(&habit.id, &range, index),
                last_completed: index.last_completed(&habit.id),
            })
            .collect();

        Ok(ProgressReport {
            mode: mode.name(),
            label: period_label(mode, anchor, &self.config),
            start: range.start(),
            end: range.end(),
            days: range.len(),
            as_of,
            completion_rate,
            prior_completion_rate,
            delta: completion_rate as i32 - prior_completion_rate as i32,
            habits: habit_progress,
            daily: daily_breakdown(&range, habits, index),
        })
    }

    /// Short plain-text observations about a report
    pub fn insights(&self, report: &ProgressReport) -> Vec<String> {
        let mut insights = Vec::new();

        if report.habits.is_empty() {
            insights.push("Start by creating your first habit to track!".to_string());
            return insights;
        }

        insights.push(format!(
            "{}: {}% of habit-days completed across {} habit{}.",
            report.label,
            report.completion_rate,
            report.habits.len(),
            if report.habits.len() == 1 { "" } else { "s" }
        ));

        match report.delta {
            d if d > 0 => insights.push(format!("Up {} points on the previous period.", d)),
            d if d < 0 => insights.push(format!("Down {} points on the previous period.", -d)),
            _ => insights.push("Unchanged from the previous period.".to_string()),
        }

        if let Some(top) = report
            .habits
            .iter()
            .filter(|h| h.current_streak > 0)
            .max_by_key(|h| h.current_streak)
        {
            insights.push(format!("Longest active streak: {} at {} days.", top.name, top.current_streak));
        }

        insights
    }
}
