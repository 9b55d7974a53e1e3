/// MCP tools exposing the progress engine
///
/// Each tool is a plain function from typed parameters to a serializable
/// response. The MCP server decodes arguments, calls the tool with the
/// current snapshot and reference day, and encodes the result.

pub mod range;
pub mod report;
pub mod shift;
pub mod snapshot;
pub mod stats;
pub mod streaks;

// Re-export tool functions for easy access
pub use range::*;
pub use report::*;
pub use shift::*;
pub use snapshot::*;
pub use stats::*;
pub use streaks::*;

use schemars::JsonSchema;
use serde::Deserialize;
use thiserror::Error;

use crate::analytics::{AnalyticsEngine, CompletionIndex};
use crate::domain::{DayId, DomainError, ViewMode};
use crate::snapshot::{Snapshot, SnapshotError};

/// Errors a tool call can report back to the client
#[derive(Error, Debug)]
pub enum ToolError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("Habit not found: {0}")]
    HabitNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Read-only state a tool works against
pub struct ToolContext<'a> {
    pub snapshot: &'a Snapshot,
    pub index: &'a CompletionIndex,
    pub engine: &'a AnalyticsEngine,
    /// Reference day used when a request leaves the anchor or as-of date out
    pub today: DayId,
}

/// View selection shared by the range, stats, streak and report tools
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ViewParams {
    /// View mode: week, month, year, allTime or custom (default: week)
    pub mode: Option<String>,
    /// Anchor day, YYYY-MM-DD (default: today)
    pub anchor: Option<String>,
    /// First day of a custom range, YYYY-MM-DD
    pub start: Option<String>,
    /// Last day of a custom range, YYYY-MM-DD
    pub end: Option<String>,
}

impl ViewParams {
    /// Parse the view into a mode and an anchor day
    pub fn resolve(&self, today: DayId) -> Result<(ViewMode, DayId), DomainError> {
        let start = parse_day(self.start.as_deref())?;
        let end = parse_day(self.end.as_deref())?;
        let mode = ViewMode::parse(self.mode.as_deref().unwrap_or("week"), start, end)?;
        let anchor = parse_day(self.anchor.as_deref())?.unwrap_or(today);
        Ok((mode, anchor))
    }
}

/// Parse an optional `YYYY-MM-DD` argument
pub fn parse_day(value: Option<&str>) -> Result<Option<DayId>, DomainError> {
    value.map(str::parse).transpose()
}
