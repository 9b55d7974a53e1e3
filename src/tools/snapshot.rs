/// Tool for replacing the snapshot the other tools read
///
/// This module implements the snapshot_load MCP tool. The caller either
/// sends habits and records inline or points at a JSON export.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{CompletionRecord, Habit};
use crate::snapshot::{JsonFileSource, Snapshot, SnapshotSource};
use crate::tools::ToolError;

/// A completion record as sent inline, with the date still unchecked
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordArg {
    pub habit_id: String,
    /// Day of the record, YYYY-MM-DD
    pub date: String,
    pub completed: bool,
}

impl RecordArg {
    pub fn to_record(&self) -> Result<CompletionRecord, ToolError> {
        Ok(CompletionRecord::parse(&self.habit_id, &self.date, self.completed)?)
    }
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct SnapshotParams {
    /// Path of a JSON export with `habits` and `records`
    pub path: Option<String>,
    /// Inline habit list
    pub habits: Option<Vec<Habit>>,
    /// Inline completion records, in store order
    pub records: Option<Vec<RecordArg>>,
}

#[derive(Debug, Serialize)]
pub struct SnapshotLoadResponse {
    pub habits: usize,
    pub records: usize,
    pub message: String,
}

/// Build the replacement snapshot described by `params`
pub fn load_snapshot(params: SnapshotParams) -> Result<(Snapshot, SnapshotLoadResponse), ToolError> {
    let snapshot = match (params.path, params.habits, params.records) {
        (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
            return Err(ToolError::InvalidArgument(
                "pass either a path or inline habits/records, not both".to_string(),
            ));
        }
        (Some(path), None, None) => JsonFileSource::new(path).load()?,
        (None, habits, records) => {
            let records = records
                .unwrap_or_default()
                .iter()
                .map(RecordArg::to_record)
                .collect::<Result<Vec<_>, _>>()?;
            Snapshot::new(habits.unwrap_or_default(), records)
        }
    };

    let response = SnapshotLoadResponse {
        habits: snapshot.habits.len(),
        records: snapshot.records.len(),
        message: format!(
            "✅ Snapshot loaded: {} habits, {} completion records",
            snapshot.habits.len(),
            snapshot.records.len()
        ),
    };

    Ok((snapshot, response))
}
