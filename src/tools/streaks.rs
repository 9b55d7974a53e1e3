/// Tool for checking habit streaks
///
/// This module implements the habit_streaks MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::HabitStreak;
use crate::domain::{range_for, DayId, HabitId};
use crate::tools::{parse_day, ToolContext, ToolError, ViewParams};

/// Parameters for checking streaks
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct StreakParams {
    /// ID of a specific habit (optional - all habits if omitted)
    pub habit_id: Option<String>,
    /// Day the current streak is counted back from, YYYY-MM-DD (default: today)
    pub as_of: Option<String>,
    /// Range the best streak is searched in
    #[serde(flatten)]
    pub view: ViewParams,
}

#[derive(Debug, Serialize)]
pub struct StreaksResponse {
    pub as_of: DayId,
    pub start: DayId,
    pub end: DayId,
    pub streaks: Vec<HabitStreak>,
    pub summary: String,
    pub message: String,
}

pub fn habit_streaks(ctx: &ToolContext<'_>, params: StreakParams) -> Result<StreaksResponse, ToolError> {
    let (mode, anchor) = params.view.resolve(ctx.today)?;
    let as_of = parse_day(params.as_of.as_deref())?.unwrap_or(ctx.today);
    let range = range_for(mode, anchor, ctx.engine.config())?;

    let habits = match params.habit_id {
        Some(id) => {
            let habit_id = HabitId::new(id);
            let habit = ctx
                .snapshot
                .habit(&habit_id)
                .ok_or_else(|| ToolError::HabitNotFound(habit_id.to_string()))?;
            vec![habit]
        }
        None => ctx.snapshot.habits.iter().collect(),
    };

    let streaks: Vec<HabitStreak> = habits
        .into_iter()
        .map(|habit| HabitStreak::compute(habit, as_of, &range, ctx.index))
        .collect();

    let summary = if streaks.is_empty() {
        "No habits found. Create your first habit to get started!".to_string()
    } else {
        let active = streaks.iter().filter(|s| s.current_streak > 0).count();
        format!("🔥 {} of {} habits on a streak as of {}", active, streaks.len(), as_of)
    };

    let message = std::iter::once(summary.clone())
        .chain(streaks.iter().map(|s| {
            format!(
                "🎯 {}: current {} | best {} | {}",
                s.name,
                s.current_streak,
                s.best_streak,
                s.motivational_message()
            )
        }))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(StreaksResponse {
        as_of,
        start: range.start(),
        end: range.end(),
        streaks,
        summary,
        message,
    })
}
