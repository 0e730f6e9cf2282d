//! Memoized derivation.

use std::sync::Arc;

use prism_core::EntryCollection;
use prism_core::entities::PracticeEntry;
use prism_core::query::{FilterCriteria, SortConfig};

use crate::derive::derive;

struct Memo {
    source: EntryCollection,
    filters: FilterCriteria,
    sort: SortConfig,
    derived: Arc<[PracticeEntry]>,
}

/// Caches the last derivation keyed on (collection identity, filters, sort).
///
/// State that is not part of the key (selection, panel, mounted variant)
/// never causes a recompute.
#[derive(Default)]
pub struct DerivationCache {
    memo: Option<Memo>,
    recomputes: u64,
}

impl DerivationCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached list when the key is unchanged, otherwise derive and store.
    pub fn get_or_derive(
        &mut self,
        source: &EntryCollection,
        filters: &FilterCriteria,
        sort: SortConfig,
    ) -> Arc<[PracticeEntry]> {
        if let Some(memo) = &self.memo {
            if memo.source.same_source(source) && memo.filters == *filters && memo.sort == sort {
                return Arc::clone(&memo.derived);
            }
        }

        let derived: Arc<[PracticeEntry]> = derive(source.as_slice(), filters, sort).into();
        self.recomputes += 1;
        tracing::debug!(
            total = source.len(),
            visible = derived.len(),
            recomputes = self.recomputes,
            "derived entry list"
        );
        self.memo = Some(Memo {
            source: source.clone(),
            filters: filters.clone(),
            sort,
            derived: Arc::clone(&derived),
        });
        derived
    }

    /// How many times the derivation actually ran.
    #[must_use]
    pub const fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    pub fn invalidate(&mut self) {
        self.memo = None;
    }
}
