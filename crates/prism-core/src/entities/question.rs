use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Difficulty;

/// A single question answered (or skipped) within a practice session.
///
/// Owned by its parent [`PracticeEntry`](super::PracticeEntry).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionEntry {
    pub id: String,
    pub topic: String,
    #[serde(default)]
    pub subtopic: String,
    pub difficulty: Difficulty,
    pub correct: bool,
    /// Seconds spent on the question.
    pub time_spent: u32,
    #[serde(default = "answered_default")]
    pub answered: bool,
}

const fn answered_default() -> bool {
    true
}
