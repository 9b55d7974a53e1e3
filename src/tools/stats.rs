/// Tool for completion rates and period-over-period change
///
/// This module implements the completion_stats MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{completion_rate, daily_breakdown, period_delta, DayTotal};
use crate::domain::{period_label, range_for, DayId};
use crate::tools::{ToolContext, ToolError, ViewParams};

/// Parameters for completion statistics
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct StatsParams {
    #[serde(flatten)]
    pub view: ViewParams,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub label: String,
    pub start: DayId,
    pub end: DayId,
    pub completion_rate: u32,
    pub prior_start: DayId,
    pub prior_end: DayId,
    pub prior_completion_rate: u32,
    pub delta: i32,
    pub daily: Vec<DayTotal>,
    pub message: String,
}

pub fn completion_stats(ctx: &ToolContext<'_>, params: StatsParams) -> Result<StatsResponse, ToolError> {
    let (mode, anchor) = params.view.resolve(ctx.today)?;
    let config = ctx.engine.config();
    let range = range_for(mode, anchor, config)?;
    let prior = range.preceding()?;
    let habits = &ctx.snapshot.habits;

    let rate = completion_rate(&range, habits, ctx.index);
    let prior_rate = completion_rate(&prior, habits, ctx.index);
    let delta = period_delta(&range, &prior, habits, ctx.index);
    let label = period_label(mode, anchor, config);

    let trend = match delta {
        d if d > 0 => format!("📈 up {} points", d),
        d if d < 0 => format!("📉 down {} points", -d),
        _ => "➡️ unchanged".to_string(),
    };

    Ok(StatsResponse {
        message: format!("📊 {}: {}% complete ({} vs previous period)", label, rate, trend),
        label,
        start: range.start(),
        end: range.end(),
        completion_rate: rate,
        prior_start: prior.start(),
        prior_end: prior.end(),
        prior_completion_rate: prior_rate,
        delta,
        daily: daily_breakdown(&range, habits, ctx.index),
    })
}
