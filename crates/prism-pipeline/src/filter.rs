//! Per-dimension filter predicates.
//!
//! Dimensions are AND-ed; values within a multi-value dimension are OR-ed. An
//! empty set passes everything on that axis.

use std::collections::BTreeSet;

use prism_core::entities::PracticeEntry;
use prism_core::query::FilterCriteria;

fn in_set<T: Ord>(allowed: &BTreeSet<T>, value: &T) -> bool {
    allowed.is_empty() || allowed.contains(value)
}

#[must_use]
pub fn passes_subject(entry: &PracticeEntry, criteria: &FilterCriteria) -> bool {
    in_set(&criteria.subjects, &entry.subject)
}

#[must_use]
pub fn passes_type(entry: &PracticeEntry, criteria: &FilterCriteria) -> bool {
    in_set(&criteria.types, &entry.entry_type)
}

#[must_use]
pub fn passes_pace(entry: &PracticeEntry, criteria: &FilterCriteria) -> bool {
    in_set(&criteria.paces, &entry.pace)
}

#[must_use]
pub fn passes_difficulty(entry: &PracticeEntry, criteria: &FilterCriteria) -> bool {
    in_set(&criteria.difficulties, &entry.difficulty)
}

#[must_use]
pub fn passes_accuracy(entry: &PracticeEntry, criteria: &FilterCriteria) -> bool {
    criteria.accuracy_range.contains(entry.accuracy)
}

/// Minutes in the criteria, seconds on the entry.
#[must_use]
pub fn passes_time(entry: &PracticeEntry, criteria: &FilterCriteria) -> bool {
    criteria
        .time_range_seconds()
        .contains(u64::from(entry.time_used))
}

#[must_use]
pub fn passes_date(entry: &PracticeEntry, criteria: &FilterCriteria) -> bool {
    criteria.dates.contains(entry.date_completed)
}

/// Conjunction of every dimension.
#[must_use]
pub fn matches(entry: &PracticeEntry, criteria: &FilterCriteria) -> bool {
    passes_subject(entry, criteria)
        && passes_type(entry, criteria)
        && passes_pace(entry, criteria)
        && passes_difficulty(entry, criteria)
        && passes_accuracy(entry, criteria)
        && passes_time(entry, criteria)
        && passes_date(entry, criteria)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use prism_core::enums::{Difficulty, Pace, Subject};
    use prism_core::query::{Bounds, DatePreset, DateSpan, ResolvedPreset};

    fn entry(subject: Subject, accuracy: u8, time_used: u32) -> PracticeEntry {
        PracticeEntry {
            id: "e".into(),
            subject,
            entry_type: "Drill".into(),
            accuracy,
            time_used,
            pace: Pace::OnPace,
            difficulty: Difficulty::Medium,
            date_completed: Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap(),
            questions: Vec::new(),
        }
    }

    #[test]
    fn empty_sets_pass_everything() {
        let criteria = FilterCriteria::default();
        assert!(matches(&entry(Subject::Science, 0, 0), &criteria));
    }

    #[test]
    fn subject_set_is_disjunctive() {
        let criteria = FilterCriteria {
            subjects: [Subject::Math, Subject::Reading].into(),
            ..FilterCriteria::default()
        };
        assert!(matches(&entry(Subject::Math, 50, 60), &criteria));
        assert!(matches(&entry(Subject::Reading, 50, 60), &criteria));
        assert!(!matches(&entry(Subject::Writing, 50, 60), &criteria));
    }

    #[rstest]
    #[case(49, false)]
    #[case(50, true)]
    #[case(80, true)]
    #[case(81, false)]
    fn accuracy_bounds_are_inclusive(#[case] accuracy: u8, #[case] expected: bool) {
        let criteria = FilterCriteria {
            accuracy_range: Bounds { min: 50, max: 80 },
            ..FilterCriteria::default()
        };
        assert_eq!(passes_accuracy(&entry(Subject::Math, accuracy, 0), &criteria), expected);
    }

    #[rstest]
    #[case(59, false)]
    #[case(60, true)]
    #[case(120, true)]
    #[case(121, false)]
    fn time_range_is_minutes_against_seconds(#[case] seconds: u32, #[case] expected: bool) {
        let criteria = FilterCriteria {
            time_range: Bounds { min: 1, max: 2 },
            ..FilterCriteria::default()
        };
        assert_eq!(passes_time(&entry(Subject::Math, 0, seconds), &criteria), expected);
    }

    #[rstest]
    #[case(0)]
    #[case(u32::MAX - 15)]
    #[case(u32::MAX)]
    fn default_time_range_passes_any_duration(#[case] seconds: u32) {
        assert!(passes_time(&entry(Subject::Math, 0, seconds), &FilterCriteria::default()));
    }

    #[test]
    fn presets_are_unioned() {
        let far = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 18, 0, 0).unwrap();
        let mut criteria = FilterCriteria::default();
        criteria.dates.presets = vec![
            ResolvedPreset {
                preset: DatePreset::Yesterday,
                span: DatePreset::Yesterday.resolve(now),
            },
            ResolvedPreset {
                preset: DatePreset::Today,
                span: DatePreset::Today.resolve(now),
            },
        ];
        criteria.dates.explicit = Some(DateSpan::new(far, far).unwrap());
        assert!(passes_date(&entry(Subject::Math, 0, 0), &criteria));
    }

    #[test]
    fn one_failing_dimension_excludes() {
        let criteria = FilterCriteria {
            subjects: [Subject::Math].into(),
            paces: [Pace::Fast].into(),
            ..FilterCriteria::default()
        };
        assert!(!matches(&entry(Subject::Math, 50, 60), &criteria));
    }
}
