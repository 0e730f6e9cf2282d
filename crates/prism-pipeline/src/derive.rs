use prism_core::entities::PracticeEntry;
use prism_core::query::{FilterCriteria, SortConfig};

use crate::{filter, sort};

/// Filter then sort, borrowing from the input.
#[must_use]
pub fn derive_refs<'a>(
    entries: &'a [PracticeEntry],
    filters: &FilterCriteria,
    sort: SortConfig,
) -> Vec<&'a PracticeEntry> {
    let mut visible: Vec<&PracticeEntry> = entries
        .iter()
        .filter(|entry| filter::matches(entry, filters))
        .collect();
    sort::sort_entries(&mut visible, sort);
    visible
}

/// Filtered and sorted copy of `entries`. Pure: the inputs are not mutated
/// and equal inputs give equal outputs. An empty result is a valid answer.
#[must_use]
pub fn derive(
    entries: &[PracticeEntry],
    filters: &FilterCriteria,
    sort: SortConfig,
) -> Vec<PracticeEntry> {
    derive_refs(entries, filters, sort)
        .into_iter()
        .cloned()
        .collect()
}
