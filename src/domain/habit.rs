/// Habit entity as handed over by the external store
///
/// Creation, renaming and deletion happen elsewhere. The engine only reads
/// the id and name; the color is carried through for presentation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::HabitId;

/// A habit the user tracks daily
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Habit {
    /// Stable identifier from the store
    pub id: HabitId,
    /// Display name (e.g., "Morning Run")
    pub name: String,
    /// Display color, typically a CSS hex string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Habit {
    pub fn new(id: impl Into<HabitId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Name to show when the stored one is blank
    pub fn display_name(&self) -> &str {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            "Untitled habit"
        } else {
            trimmed
        }
    }
}
