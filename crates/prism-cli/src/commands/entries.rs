use prism_core::entities::PracticeEntry;
use prism_core::enums::{Difficulty, Pace, Subject};
use prism_pipeline::derive_refs;
use serde::Serialize;

use crate::cli::{GlobalFlags, QueryArgs};
use crate::context::AppContext;
use crate::output::output;

/// One listing row per entry; questions are summarized as counts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRow<'a> {
    pub id: &'a str,
    pub subject: Subject,
    #[serde(rename = "type")]
    pub entry_type: &'a str,
    pub accuracy: u8,
    pub minutes: u32,
    pub pace: Pace,
    pub difficulty: Difficulty,
    pub date: String,
    pub questions: usize,
    pub correct: usize,
}

impl<'a> From<&'a PracticeEntry> for EntryRow<'a> {
    fn from(entry: &'a PracticeEntry) -> Self {
        Self {
            id: &entry.id,
            subject: entry.subject,
            entry_type: &entry.entry_type,
            accuracy: entry.accuracy,
            minutes: entry.time_used_minutes(),
            pace: entry.pace,
            difficulty: entry.difficulty,
            date: entry.date_completed.format("%Y-%m-%d").to_string(),
            questions: entry.question_count(),
            correct: entry.correct_count(),
        }
    }
}

/// Handle `prism entries`.
pub fn handle(args: &QueryArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let query = ctx.query_state(&args.to_patch()?)?;
    let rows = derive_refs(ctx.entries.as_slice(), query.filters(), query.sort())
        .into_iter()
        .take(ctx.limit(flags.limit)?)
        .map(EntryRow::from)
        .collect::<Vec<_>>();
    tracing::debug!(shown = rows.len(), total = ctx.entries.len(), "entries derived");
    output(&rows, flags.format)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use prism_core::entities::QuestionEntry;

    use super::*;

    #[test]
    fn row_summarizes_an_entry() {
        let question = |id: &str, correct| QuestionEntry {
            id: id.into(),
            topic: "Algebra".into(),
            subtopic: String::new(),
            difficulty: Difficulty::Easy,
            correct,
            time_spent: 30,
            answered: true,
        };
        let entry = PracticeEntry {
            id: "e1".into(),
            subject: Subject::Math,
            entry_type: "Drill".into(),
            accuracy: 50,
            time_used: 150,
            pace: Pace::OnPace,
            difficulty: Difficulty::Medium,
            date_completed: Utc.with_ymd_and_hms(2026, 3, 1, 23, 0, 0).unwrap(),
            questions: vec![question("q1", true), question("q2", false)],
        };

        let value = serde_json::to_value(EntryRow::from(&entry)).unwrap();
        assert_eq!(value["type"], "Drill");
        assert_eq!(value["pace"], "On Pace");
        assert_eq!(value["date"], "2026-03-01");
        assert_eq!(value["questions"], 2);
        assert_eq!(value["correct"], 1);
    }
}
