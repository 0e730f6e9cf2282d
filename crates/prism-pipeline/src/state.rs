//! Validated query state.
//!
//! Every setter either commits a valid value or returns `PipelineError` and
//! leaves the previous state untouched. Derivation therefore never sees an
//! inverted range or an unsortable key.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use prism_core::enums::{Difficulty, Pace, SortDirection, Subject};
use prism_core::query::{
    Bounds, DatePreset, DateSpan, FilterCriteria, MAX_ACCURACY, ResolvedPreset, SortConfig, SortKey,
};

use crate::clock::Clock;
use crate::error::PipelineError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    filters: FilterCriteria,
    sort: SortConfig,
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

impl QueryState {
    #[must_use]
    pub fn new(sort: SortConfig) -> Self {
        Self {
            filters: FilterCriteria::default(),
            sort,
        }
    }

    /// Build from externally supplied parts, e.g. restored state.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::InvalidFilter` if the criteria break a range invariant.
    pub fn from_parts(filters: FilterCriteria, sort: SortConfig) -> Result<Self, PipelineError> {
        filters.validate().map_err(PipelineError::InvalidFilter)?;
        Ok(Self { filters, sort })
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    #[must_use]
    pub const fn sort(&self) -> SortConfig {
        self.sort
    }

    // -- set dimensions ------------------------------------------------------

    pub fn set_subjects(&mut self, subjects: impl IntoIterator<Item = Subject>) {
        self.filters.subjects = subjects.into_iter().collect();
    }

    pub fn toggle_subject(&mut self, subject: Subject) {
        toggle(&mut self.filters.subjects, subject);
    }

    pub fn set_types<S: Into<String>>(&mut self, types: impl IntoIterator<Item = S>) {
        self.filters.types = types.into_iter().map(Into::into).collect();
    }

    pub fn toggle_type(&mut self, entry_type: impl Into<String>) {
        toggle(&mut self.filters.types, entry_type.into());
    }

    pub fn set_paces(&mut self, paces: impl IntoIterator<Item = Pace>) {
        self.filters.paces = paces.into_iter().collect();
    }

    pub fn toggle_pace(&mut self, pace: Pace) {
        toggle(&mut self.filters.paces, pace);
    }

    pub fn set_difficulties(&mut self, difficulties: impl IntoIterator<Item = Difficulty>) {
        self.filters.difficulties = difficulties.into_iter().collect();
    }

    // -- ranges --------------------------------------------------------------

    /// # Errors
    ///
    /// Rejects `min > max` or `max > 100`.
    pub fn set_accuracy_range(&mut self, min: u8, max: u8) -> Result<(), PipelineError> {
        let bounds = Bounds::new("accuracyRange", min, max).map_err(reject_filter)?;
        if max > MAX_ACCURACY {
            return Err(reject_filter(prism_core::CoreError::Validation(format!(
                "accuracyRange: max {max} exceeds {MAX_ACCURACY}"
            ))));
        }
        self.filters.accuracy_range = bounds;
        Ok(())
    }

    /// Range in whole minutes.
    ///
    /// # Errors
    ///
    /// Rejects `min > max`.
    pub fn set_time_range_minutes(&mut self, min: u32, max: u32) -> Result<(), PipelineError> {
        self.filters.time_range = Bounds::new("timeRange", min, max).map_err(reject_filter)?;
        Ok(())
    }

    // -- dates ---------------------------------------------------------------

    /// Replace the active presets, resolving each against `clock`. An empty
    /// list falls back to the explicit range, if any.
    pub fn set_date_presets(
        &mut self,
        presets: impl IntoIterator<Item = DatePreset>,
        clock: &dyn Clock,
    ) {
        let now = clock.now();
        let unique: BTreeSet<DatePreset> = presets.into_iter().collect();
        self.filters.dates.presets = unique
            .into_iter()
            .map(|preset| ResolvedPreset {
                preset,
                span: preset.resolve(now),
            })
            .collect();
    }

    pub fn toggle_date_preset(&mut self, preset: DatePreset, clock: &dyn Clock) {
        let mut active: BTreeSet<DatePreset> =
            self.filters.dates.presets.iter().map(|p| p.preset).collect();
        toggle(&mut active, preset);
        self.set_date_presets(active, clock);
    }

    /// Re-resolve active presets, e.g. after midnight. Returns whether any
    /// interval moved.
    pub fn refresh_date_presets(&mut self, clock: &dyn Clock) -> bool {
        let now = clock.now();
        let mut changed = false;
        for resolved in &mut self.filters.dates.presets {
            let span = resolved.preset.resolve(now);
            if span != resolved.span {
                resolved.span = span;
                changed = true;
            }
        }
        changed
    }

    /// # Errors
    ///
    /// Rejects `start > end`.
    pub fn set_explicit_dates(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<(), PipelineError> {
        self.filters.dates.explicit = Some(DateSpan::new(start, end).map_err(reject_filter)?);
        Ok(())
    }

    pub fn clear_dates(&mut self) {
        self.filters.dates = prism_core::query::DateFilter::default();
    }

    pub fn reset_filters(&mut self) {
        self.filters = FilterCriteria::default();
    }

    // -- sort ----------------------------------------------------------------

    pub fn set_sort(&mut self, sort: SortConfig) {
        self.sort = sort;
    }

    /// Parse and apply a sort key by field name.
    ///
    /// # Errors
    ///
    /// Rejects unknown fields and fields without a total order.
    pub fn set_sort_key_str(&mut self, field: &str) -> Result<(), PipelineError> {
        let key = field.parse::<SortKey>().map_err(|e| {
            tracing::warn!(field, error = %e, "rejected sort key");
            PipelineError::InvalidSort(e)
        })?;
        self.sort.key = key;
        Ok(())
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        self.sort.direction = direction;
    }

    pub fn toggle_sort_direction(&mut self) {
        self.sort.direction = self.sort.direction.reversed();
    }
}

fn reject_filter(error: prism_core::CoreError) -> PipelineError {
    tracing::warn!(%error, "rejected filter update");
    PipelineError::InvalidFilter(error)
}
