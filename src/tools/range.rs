/// Tool for listing the days of a view
///
/// This module implements the date_range MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{period_label, range_for, DayId};
use crate::tools::{ToolContext, ToolError, ViewParams};

/// Parameters for generating a date range
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct DateRangeParams {
    #[serde(flatten)]
    pub view: ViewParams,
}

/// Response with the ordered days of the view
#[derive(Debug, Serialize)]
pub struct DateRangeResponse {
    pub mode: &'static str,
    pub label: String,
    pub start: DayId,
    pub end: DayId,
    pub length: usize,
    pub days: Vec<DayId>,
    pub message: String,
}

pub fn date_range(ctx: &ToolContext<'_>, params: DateRangeParams) -> Result<DateRangeResponse, ToolError> {
    let (mode, anchor) = params.view.resolve(ctx.today)?;
    let config = ctx.engine.config();
    let range = range_for(mode, anchor, config)?;
    let label = period_label(mode, anchor, config);

    tracing::debug!("date_range {} anchored at {}: {} days", mode.name(), anchor, range.len());

    Ok(DateRangeResponse {
        mode: mode.name(),
        message: format!("📅 {}: {} to {} ({} days)", label, range.start(), range.end(), range.len()),
        label,
        start: range.start(),
        end: range.end(),
        length: range.len(),
        days: range.to_vec(),
    })
}
