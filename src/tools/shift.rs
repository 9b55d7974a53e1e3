/// Tool for previous/next period navigation
///
/// This module implements the shift_period MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{period_label, range_for, shift_view, DayId, Direction, ViewMode};
use crate::tools::{ToolContext, ToolError, ViewParams};

/// Direction as either a step (-1/+1) or a name ("previous"/"next")
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum DirectionArg {
    Step(i64),
    Name(String),
}

impl DirectionArg {
    pub fn to_direction(&self) -> Result<Direction, ToolError> {
        let direction = match self {
            DirectionArg::Step(step) => Direction::try_from(*step)?,
            DirectionArg::Name(name) => Direction::parse(name)?,
        };
        Ok(direction)
    }
}

/// Parameters for shifting a view
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ShiftParams {
    #[serde(flatten)]
    pub view: ViewParams,
    /// -1 / "previous" or +1 / "next"
    pub direction: DirectionArg,
}

/// Response with the new anchor and the period it selects
#[derive(Debug, Serialize)]
pub struct ShiftResponse {
    pub mode: &'static str,
    pub anchor: DayId,
    pub label: String,
    pub start: DayId,
    pub end: DayId,
    pub message: String,
}

pub fn shift_period(ctx: &ToolContext<'_>, params: ShiftParams) -> Result<ShiftResponse, ToolError> {
    let (mode, anchor) = params.view.resolve(ctx.today)?;
    let direction = params.direction.to_direction()?;
    let config = ctx.engine.config();

    let (next_mode, next_anchor) = shift_view(mode, anchor, direction, config)?;
    let range = range_for(next_mode, next_anchor, config)?;
    let label = period_label(next_mode, next_anchor, config);

    tracing::debug!("shift_period {} {:?}: {} -> {}", mode.name(), direction, anchor, next_anchor);

    let message = match next_mode {
        ViewMode::Custom { .. } => format!("↔️ Moved to {}", label),
        _ => format!("↔️ Moved to {} (anchor {})", label, next_anchor),
    };

    Ok(ShiftResponse {
        mode: next_mode.name(),
        anchor: next_anchor,
        label,
        start: range.start(),
        end: range.end(),
        message,
    })
}
