/// Tool for the full progress report
///
/// This module implements the progress_report MCP tool that combines
/// rates, deltas, streaks and insights for one view.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::ProgressReport;
use crate::tools::{parse_day, ToolContext, ToolError, ViewParams};

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ReportParams {
    #[serde(flatten)]
    pub view: ViewParams,
    /// Day current streaks are counted back from, YYYY-MM-DD (default: today)
    pub as_of: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub report: ProgressReport,
    pub insights: Vec<String>,
    pub message: String,
}

pub fn progress_report(ctx: &ToolContext<'_>, params: ReportParams) -> Result<ReportResponse, ToolError> {
    let (mode, anchor) = params.view.resolve(ctx.today)?;
    let as_of = parse_day(params.as_of.as_deref())?.unwrap_or(ctx.today);

    let report = ctx
        .engine
        .report(&ctx.snapshot.habits, ctx.index, mode, anchor, as_of)?;
    let insights = ctx.engine.insights(&report);

    tracing::debug!(
        "progress_report {} ({} habits, {} days)",
        report.label,
        report.habits.len(),
        report.days
    );

    Ok(ReportResponse {
        message: insights.join("\n"),
        report,
        insights,
    })
}
