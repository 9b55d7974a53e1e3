/// JSON file implementation of the snapshot source
///
/// Reads an export of the user's habits and completion records in the same
/// shape the sync service delivers them.

use std::path::{Path, PathBuf};

use crate::snapshot::{Snapshot, SnapshotError, SnapshotSource};

pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for JsonFileSource {
    fn load(&self) -> Result<Snapshot, SnapshotError> {
        let content = std::fs::read_to_string(self.path()).map_err(|source| SnapshotError::Io {
            path: self.path.clone(),
            source,
        })?;

        let snapshot: Snapshot = serde_json::from_str(&content)?;

        tracing::info!(
            "Loaded snapshot from {}: {} habits, {} records",
            self.path().display(),
            snapshot.habits.len(),
            snapshot.records.len()
        );

        Ok(snapshot)
    }
}
