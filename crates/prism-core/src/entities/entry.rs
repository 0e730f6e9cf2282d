use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::QuestionEntry;
use crate::enums::{Difficulty, Pace, Subject};

/// A completed practice session.
///
/// Immutable once loaded; the entry store owns it and every other component
/// only reads it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PracticeEntry {
    pub id: String,
    pub subject: Subject,
    /// Free-form category label, e.g. "Practice Set" or "Full Test".
    #[serde(rename = "type")]
    pub entry_type: String,
    /// Percentage correct, 0-100.
    pub accuracy: u8,
    /// Seconds used for the whole set.
    pub time_used: u32,
    pub pace: Pace,
    pub difficulty: Difficulty,
    pub date_completed: DateTime<Utc>,
    #[serde(default)]
    pub questions: Vec<QuestionEntry>,
}

impl PracticeEntry {
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.questions.iter().filter(|q| q.correct).count()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.questions.iter().filter(|q| q.answered).count()
    }

    /// Whole minutes used, rounded down.
    #[must_use]
    pub const fn time_used_minutes(&self) -> u32 {
        self.time_used / 60
    }
}
