//! Filter options available in the current collection.

use std::collections::BTreeSet;

use prism_core::entities::PracticeEntry;
use prism_core::enums::{Difficulty, Pace, Subject};
use prism_core::query::Bounds;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterFacets {
    pub subjects: BTreeSet<Subject>,
    pub types: BTreeSet<String>,
    pub paces: BTreeSet<Pace>,
    pub difficulties: BTreeSet<Difficulty>,
    /// `None` for an empty collection.
    pub accuracy: Option<Bounds<u8>>,
    /// Observed minutes, rounded down at the low end and up at the high end.
    pub minutes: Option<Bounds<u32>>,
}

impl FilterFacets {
    #[must_use]
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a PracticeEntry>,
    {
        let mut facets = Self::default();
        for entry in entries {
            facets.subjects.insert(entry.subject);
            facets.types.insert(entry.entry_type.clone());
            facets.paces.insert(entry.pace);
            facets.difficulties.insert(entry.difficulty);

            let accuracy = facets.accuracy.get_or_insert(Bounds {
                min: entry.accuracy,
                max: entry.accuracy,
            });
            accuracy.min = accuracy.min.min(entry.accuracy);
            accuracy.max = accuracy.max.max(entry.accuracy);

            let low = entry.time_used / 60;
            let high = entry.time_used.div_ceil(60);
            let minutes = facets.minutes.get_or_insert(Bounds { min: low, max: high });
            minutes.min = minutes.min.min(low);
            minutes.max = minutes.max.max(high);
        }
        facets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::EntryCollection;

    #[test]
    fn collects_distinct_values_and_bounds() {
        let entries = EntryCollection::from_json_str(
            r#"[
            {"id": "a", "subject": "Math", "type": "Drill", "accuracy": 40, "timeUsed": 90,
             "pace": "Fast", "difficulty": "Easy", "dateCompleted": "2026-01-01T00:00:00Z"},
            {"id": "b", "subject": "Math", "type": "Full Test", "accuracy": 95, "timeUsed": 3600,
             "pace": "Slow", "difficulty": "Hard", "dateCompleted": "2026-01-02T00:00:00Z"}
        ]"#,
        )
        .unwrap();
        let facets = FilterFacets::from_entries(&entries);
        assert_eq!(facets.subjects.len(), 1);
        assert_eq!(facets.types.len(), 2);
        assert_eq!(facets.accuracy, Some(Bounds { min: 40, max: 95 }));
        assert_eq!(facets.minutes, Some(Bounds { min: 1, max: 60 }));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let entries = EntryCollection::from_json_str(
            r#"[{"id": "a", "subject": "Math", "type": "Drill", "accuracy": 40, "timeUsed": 90,
                 "pace": "On Pace", "difficulty": "Easy", "dateCompleted": "2026-01-01T00:00:00Z"}]"#,
        )
        .unwrap();
        let value = serde_json::to_value(FilterFacets::from_entries(&entries)).unwrap();
        assert_eq!(value["paces"], serde_json::json!(["On Pace"]));
        assert_eq!(value["minutes"], serde_json::json!({"min": 1, "max": 2}));
    }

    #[test]
    fn empty_collection_has_no_bounds() {
        let facets = FilterFacets::from_entries(&EntryCollection::empty());
        assert!(facets.accuracy.is_none());
        assert!(facets.subjects.is_empty());
    }
}
