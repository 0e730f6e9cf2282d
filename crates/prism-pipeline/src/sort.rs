//! Stable comparator over sortable fields.

use std::cmp::Ordering;

use prism_core::entities::PracticeEntry;
use prism_core::enums::SortDirection;
use prism_core::query::{SortConfig, SortKey};

/// Ascending comparison on `key`. Dates compare by timestamp.
#[must_use]
pub fn compare_by(key: SortKey, a: &PracticeEntry, b: &PracticeEntry) -> Ordering {
    match key {
        SortKey::DateCompleted => a.date_completed.cmp(&b.date_completed),
        SortKey::Accuracy => a.accuracy.cmp(&b.accuracy),
        SortKey::TimeUsed => a.time_used.cmp(&b.time_used),
        SortKey::QuestionCount => a.question_count().cmp(&b.question_count()),
        SortKey::Difficulty => a.difficulty.rank().cmp(&b.difficulty.rank()),
    }
}

/// Comparison honouring the configured direction.
#[must_use]
pub fn compare(config: SortConfig, a: &PracticeEntry, b: &PracticeEntry) -> Ordering {
    let ordering = compare_by(config.key, a, b);
    match config.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Sort in place. `sort_by` is stable, so equal keys keep their input order
/// in both directions.
pub fn sort_entries(entries: &mut [&PracticeEntry], config: SortConfig) {
    entries.sort_by(|a, b| compare(config, a, b));
}
