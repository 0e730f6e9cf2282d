//! Flattened question projection for question-oriented views.
//!
//! A read-only denormalization: every question is paired with back-references
//! to the set it came from. Questions are never owned outside their entry.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entities::{PracticeEntry, QuestionEntry};
use crate::enums::Subject;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlattenedQuestion<'a> {
    #[serde(flatten)]
    pub question: &'a QuestionEntry,
    pub set_id: &'a str,
    pub set_subject: Subject,
    pub set_type: &'a str,
    pub set_date: DateTime<Utc>,
}

/// Flatten in entry order, then question order.
#[must_use]
pub fn flatten_questions<'a, I>(entries: I) -> Vec<FlattenedQuestion<'a>>
where
    I: IntoIterator<Item = &'a PracticeEntry>,
{
    entries
        .into_iter()
        .flat_map(|entry| {
            entry.questions.iter().map(move |question| FlattenedQuestion {
                question,
                set_id: &entry.id,
                set_subject: entry.subject,
                set_type: &entry.entry_type,
                set_date: entry.date_completed,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{Difficulty, Pace};
    use chrono::TimeZone;

    fn question(id: &str) -> QuestionEntry {
        QuestionEntry {
            id: id.into(),
            topic: "Algebra".into(),
            subtopic: String::new(),
            difficulty: Difficulty::Easy,
            correct: true,
            time_spent: 30,
            answered: true,
        }
    }

    fn entry(id: &str, questions: Vec<QuestionEntry>) -> PracticeEntry {
        PracticeEntry {
            id: id.into(),
            subject: Subject::Math,
            entry_type: "Drill".into(),
            accuracy: 80,
            time_used: 300,
            pace: Pace::Fast,
            difficulty: Difficulty::Medium,
            date_completed: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            questions,
        }
    }

    #[test]
    fn preserves_entry_then_question_order() {
        let entries = [
            entry("s1", vec![question("q1"), question("q2")]),
            entry("s2", vec![question("q3")]),
        ];
        let flat = flatten_questions(&entries);
        let ids: Vec<(&str, &str)> = flat
            .iter()
            .map(|f| (f.set_id, f.question.id.as_str()))
            .collect();
        assert_eq!(ids, vec![("s1", "q1"), ("s1", "q2"), ("s2", "q3")]);
    }

    #[test]
    fn serializes_question_fields_inline() {
        let entries = [entry("s1", vec![question("q1")])];
        let flat = flatten_questions(&entries);
        let json = serde_json::to_value(&flat[0]).unwrap();
        assert_eq!(json["id"], "q1");
        assert_eq!(json["setId"], "s1");
        assert_eq!(json["setSubject"], "Math");
    }
}
