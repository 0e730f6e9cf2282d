//! Filter criteria and sort configuration.
//!
//! These are plain values: the pipeline crate owns the predicates, the
//! comparator and the validated mutation boundary. Everything here derives
//! `PartialEq` so the derivation memo can compare the current query against the
//! one it last computed.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Difficulty, Pace, SortDirection, Subject};
use crate::errors::CoreError;

/// Largest accuracy value an entry can carry.
pub const MAX_ACCURACY: u8 = 100;

/// Upper time bound used when the user has not narrowed the time range.
pub const UNBOUNDED_MINUTES: u32 = u32::MAX / 60;

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// An inclusive `[min, max]` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy + fmt::Display> Bounds<T> {
    /// Build a range, rejecting `min > max`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidRange` when `min > max`.
    pub fn new(field: &'static str, min: T, max: T) -> Result<Self, CoreError> {
        if min > max {
            return Err(CoreError::InvalidRange {
                field,
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }

    /// Pull both ends into `[floor, ceiling]` and swap them if reversed.
    ///
    /// Input widgets use this so an invalid range never reaches a setter.
    #[must_use]
    pub fn clamped(min: T, max: T, floor: T, ceiling: T) -> Self {
        let clamp = |v: T| {
            if v < floor {
                floor
            } else if v > ceiling {
                ceiling
            } else {
                v
            }
        };
        let (a, b) = (clamp(min), clamp(max));
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }
}

impl<T: FromStr + PartialOrd + Copy + fmt::Display> Bounds<T> {
    /// Parse `"MIN..MAX"`; either side may be omitted and falls back to the
    /// provided default.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for malformed input and
    /// `CoreError::InvalidRange` when `min > max`.
    pub fn parse(field: &'static str, input: &str, default: Self) -> Result<Self, CoreError> {
        let (lo, hi) = input
            .split_once("..")
            .ok_or_else(|| CoreError::Validation(format!("{field}: expected MIN..MAX, got '{input}'")))?;
        let side = |text: &str, fallback: T| -> Result<T, CoreError> {
            let text = text.trim();
            if text.is_empty() {
                return Ok(fallback);
            }
            text.parse::<T>()
                .map_err(|_| CoreError::Validation(format!("{field}: '{text}' is not a number")))
        };
        Self::new(field, side(lo, default.min)?, side(hi, default.max)?)
    }
}

// ---------------------------------------------------------------------------
// DateSpan / DatePreset
// ---------------------------------------------------------------------------

/// An inclusive timestamp interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DateSpan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateSpan {
    /// # Errors
    ///
    /// Returns `CoreError::InvalidRange` when `start > end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::InvalidRange {
                field: "dates",
                min: start.to_rfc3339(),
                max: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

fn start_of(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Last representable instant before `next` begins.
fn just_before(next: DateTime<Utc>) -> DateTime<Utc> {
    next - Duration::nanoseconds(1)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    first_of_month(first_of_month(date) + Duration::days(32))
}

fn first_of_year(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.ordinal0()))
}

/// Named relative date ranges offered by the date filter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum DatePreset {
    Today,
    Yesterday,
    #[serde(rename = "Last 7 days")]
    Last7Days,
    #[serde(rename = "Last 30 days")]
    Last30Days,
    #[serde(rename = "This week")]
    ThisWeek,
    #[serde(rename = "This month")]
    ThisMonth,
    #[serde(rename = "Last month")]
    LastMonth,
    #[serde(rename = "This year")]
    ThisYear,
}

impl DatePreset {
    pub const ALL: [Self; 8] = [
        Self::Today,
        Self::Yesterday,
        Self::Last7Days,
        Self::Last30Days,
        Self::ThisWeek,
        Self::ThisMonth,
        Self::LastMonth,
        Self::ThisYear,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Yesterday => "Yesterday",
            Self::Last7Days => "Last 7 days",
            Self::Last30Days => "Last 30 days",
            Self::ThisWeek => "This week",
            Self::ThisMonth => "This month",
            Self::LastMonth => "Last month",
            Self::ThisYear => "This year",
        }
    }

    /// Resolve to a concrete interval relative to `now` (UTC calendar days).
    #[must_use]
    pub fn resolve(self, now: DateTime<Utc>) -> DateSpan {
        let today = now.date_naive();
        let tomorrow = start_of(today + Duration::days(1));
        let (start, end) = match self {
            Self::Today => (start_of(today), just_before(tomorrow)),
            Self::Yesterday => (
                start_of(today - Duration::days(1)),
                just_before(start_of(today)),
            ),
            Self::Last7Days => (start_of(today - Duration::days(6)), just_before(tomorrow)),
            Self::Last30Days => (start_of(today - Duration::days(29)), just_before(tomorrow)),
            Self::ThisWeek => {
                let monday =
                    today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
                (start_of(monday), just_before(tomorrow))
            }
            Self::ThisMonth => (
                start_of(first_of_month(today)),
                just_before(start_of(first_of_next_month(today))),
            ),
            Self::LastMonth => {
                let this_month = first_of_month(today);
                let last_month = first_of_month(this_month - Duration::days(1));
                (start_of(last_month), just_before(start_of(this_month)))
            }
            Self::ThisYear => {
                let jan1 = first_of_year(today);
                let next_jan1 = first_of_year(jan1 + Duration::days(366));
                (start_of(jan1), just_before(start_of(next_jan1)))
            }
        };
        DateSpan { start, end }
    }
}

impl fmt::Display for DatePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DatePreset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = crate::enums::fold(s);
        Self::ALL
            .iter()
            .copied()
            .find(|p| crate::enums::fold(p.label()) == wanted)
            .ok_or_else(|| CoreError::UnknownValue {
                kind: "date preset",
                value: s.to_string(),
            })
    }
}

/// A preset together with the interval it resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResolvedPreset {
    pub preset: DatePreset,
    pub span: DateSpan,
}

/// Date constraint: any number of presets (OR-ed), or an explicit range used
/// only when no preset is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DateFilter {
    #[serde(default)]
    pub presets: Vec<ResolvedPreset>,
    #[serde(default)]
    pub explicit: Option<DateSpan>,
}

impl DateFilter {
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.presets.is_empty() && self.explicit.is_none()
    }

    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        if !self.presets.is_empty() {
            return self.presets.iter().any(|p| p.span.contains(at));
        }
        self.explicit.is_none_or(|span| span.contains(at))
    }
}

// ---------------------------------------------------------------------------
// FilterCriteria
// ---------------------------------------------------------------------------

/// Multi-dimensional query over the entry collection.
///
/// Empty sets mean "all values pass". Ranges are inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    pub subjects: BTreeSet<Subject>,
    #[serde(default)]
    pub types: BTreeSet<String>,
    #[serde(default)]
    pub paces: BTreeSet<Pace>,
    #[serde(default)]
    pub difficulties: BTreeSet<Difficulty>,
    pub accuracy_range: Bounds<u8>,
    /// Minutes; compared against entry time in seconds.
    pub time_range: Bounds<u32>,
    #[serde(default)]
    pub dates: DateFilter,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            subjects: BTreeSet::new(),
            types: BTreeSet::new(),
            paces: BTreeSet::new(),
            difficulties: BTreeSet::new(),
            accuracy_range: Bounds {
                min: 0,
                max: MAX_ACCURACY,
            },
            time_range: Bounds {
                min: 0,
                max: UNBOUNDED_MINUTES,
            },
            dates: DateFilter::default(),
        }
    }
}

impl FilterCriteria {
    /// Time range converted to seconds. A maximum at [`UNBOUNDED_MINUTES`]
    /// or above has no upper limit.
    #[must_use]
    pub fn time_range_seconds(&self) -> Bounds<u64> {
        let max = if self.time_range.max >= UNBOUNDED_MINUTES {
            u64::MAX
        } else {
            u64::from(self.time_range.max) * 60
        };
        Bounds {
            min: u64::from(self.time_range.min) * 60,
            max,
        }
    }

    /// Check every range invariant. Used on data that bypassed the setters,
    /// e.g. restored state.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), CoreError> {
        Bounds::new("accuracyRange", self.accuracy_range.min, self.accuracy_range.max)?;
        if self.accuracy_range.max > MAX_ACCURACY {
            return Err(CoreError::Validation(format!(
                "accuracyRange: max {} exceeds {MAX_ACCURACY}",
                self.accuracy_range.max
            )));
        }
        Bounds::new("timeRange", self.time_range.min, self.time_range.max)?;
        for span in self
            .dates
            .presets
            .iter()
            .map(|p| &p.span)
            .chain(self.dates.explicit.as_ref())
        {
            DateSpan::new(span.start, span.end)?;
        }
        Ok(())
    }

    /// Whether any dimension narrows the collection.
    #[must_use]
    pub fn is_active(&self) -> bool {
        *self != Self::default()
    }
}

// ---------------------------------------------------------------------------
// SortKey / SortConfig
// ---------------------------------------------------------------------------

/// Fields with a total order that the pipeline can sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    DateCompleted,
    Accuracy,
    TimeUsed,
    QuestionCount,
    Difficulty,
}

/// Entry fields that exist but cannot be sorted on.
const UNSORTABLE_FIELDS: [&str; 6] = ["id", "subject", "type", "pace", "questions", "topic"];

impl SortKey {
    pub const ALL: [Self; 5] = [
        Self::DateCompleted,
        Self::Accuracy,
        Self::TimeUsed,
        Self::QuestionCount,
        Self::Difficulty,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DateCompleted => "dateCompleted",
            Self::Accuracy => "accuracy",
            Self::TimeUsed => "timeUsed",
            Self::QuestionCount => "questionCount",
            Self::Difficulty => "difficulty",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['_', '-'], "").to_lowercase();
        if let Some(key) = Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str().to_lowercase() == wanted)
        {
            return Ok(key);
        }
        if UNSORTABLE_FIELDS.contains(&wanted.as_str()) {
            return Err(CoreError::NotSortable(s.to_string()));
        }
        Err(CoreError::UnknownValue {
            kind: "sort key",
            value: s.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortConfig {
    #[must_use]
    pub const fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }
}

impl fmt::Display for SortConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.direction)
    }
}

/// Parses `key` or `key:direction`; the direction defaults to descending.
impl FromStr for SortConfig {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, direction) = match s.split_once(':') {
            Some((key, dir)) => (key, dir.parse()?),
            None => (s, SortDirection::default()),
        };
        Ok(Self::new(key.parse()?, direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn bounds_reject_reversed_range() {
        let err = Bounds::new("accuracyRange", 80u8, 20).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRange { field: "accuracyRange", .. }));
    }

    #[test]
    fn bounds_are_inclusive() {
        let b = Bounds::new("x", 10u8, 20).unwrap();
        assert!(b.contains(10));
        assert!(b.contains(20));
        assert!(!b.contains(21));
    }

    #[test]
    fn clamped_swaps_and_limits() {
        let b = Bounds::clamped(120u8, 30, 0, 100);
        assert_eq!(b, Bounds { min: 30, max: 100 });
    }

    #[rstest]
    #[case("10..20", 10, 20)]
    #[case("..40", 0, 40)]
    #[case("60..", 60, 100)]
    fn bounds_parse_fills_open_sides(#[case] input: &str, #[case] min: u8, #[case] max: u8) {
        let default = Bounds { min: 0u8, max: 100 };
        assert_eq!(Bounds::parse("accuracy", input, default).unwrap(), Bounds { min, max });
    }

    #[test]
    fn bounds_parse_rejects_garbage() {
        let default = Bounds { min: 0u8, max: 100 };
        assert!(Bounds::parse("accuracy", "ten", default).is_err());
        assert!(Bounds::parse("accuracy", "a..b", default).is_err());
        assert!(Bounds::parse("accuracy", "90..10", default).is_err());
    }

    #[test]
    fn time_range_converts_minutes_to_seconds() {
        let criteria = FilterCriteria {
            time_range: Bounds { min: 2, max: 5 },
            ..FilterCriteria::default()
        };
        assert_eq!(criteria.time_range_seconds(), Bounds { min: 120, max: 300 });
    }

    #[test]
    fn default_time_range_has_no_ceiling() {
        let seconds = FilterCriteria::default().time_range_seconds();
        assert_eq!(seconds.max, u64::MAX);
        assert!(seconds.contains(u64::from(u32::MAX)));
    }

    #[test]
    fn last_seven_days_includes_today_and_six_before() {
        let now = at(2026, 3, 10, 15);
        let span = DatePreset::Last7Days.resolve(now);
        assert_eq!(span.start, at(2026, 3, 4, 0));
        assert!(span.contains(at(2026, 3, 10, 23)));
        assert!(!span.contains(at(2026, 3, 3, 23)));
    }

    #[test]
    fn this_month_covers_whole_month() {
        let span = DatePreset::ThisMonth.resolve(at(2026, 2, 14, 9));
        assert_eq!(span.start, at(2026, 2, 1, 0));
        assert!(span.contains(at(2026, 2, 28, 23)));
        assert!(!span.contains(at(2026, 3, 1, 0)));
    }

    #[test]
    fn last_month_wraps_year() {
        let span = DatePreset::LastMonth.resolve(at(2026, 1, 5, 9));
        assert_eq!(span.start, at(2025, 12, 1, 0));
        assert!(span.contains(at(2025, 12, 31, 23)));
        assert!(!span.contains(at(2026, 1, 1, 0)));
    }

    #[test]
    fn this_week_starts_on_monday() {
        // 2026-03-12 is a Thursday.
        let span = DatePreset::ThisWeek.resolve(at(2026, 3, 12, 8));
        assert_eq!(span.start, at(2026, 3, 9, 0));
    }

    #[test]
    fn this_year_ends_on_december_31() {
        let span = DatePreset::ThisYear.resolve(at(2026, 6, 1, 0));
        assert_eq!(span.start, at(2026, 1, 1, 0));
        assert!(span.contains(at(2026, 12, 31, 23)));
        assert!(!span.contains(at(2027, 1, 1, 0)));
    }

    #[test]
    fn preset_parses_label() {
        assert_eq!("last 7 days".parse::<DatePreset>().unwrap(), DatePreset::Last7Days);
        assert_eq!("this-month".parse::<DatePreset>().unwrap(), DatePreset::ThisMonth);
    }

    #[test]
    fn date_filter_prefers_presets_over_explicit() {
        let now = at(2026, 3, 10, 12);
        let filter = DateFilter {
            presets: vec![ResolvedPreset {
                preset: DatePreset::Today,
                span: DatePreset::Today.resolve(now),
            }],
            explicit: Some(DateSpan::new(at(2020, 1, 1, 0), at(2020, 1, 2, 0)).unwrap()),
        };
        assert!(filter.contains(at(2026, 3, 10, 1)));
        assert!(!filter.contains(at(2020, 1, 1, 12)));
    }

    #[rstest]
    #[case("accuracy", SortKey::Accuracy)]
    #[case("dateCompleted", SortKey::DateCompleted)]
    #[case("date_completed", SortKey::DateCompleted)]
    #[case("TimeUsed", SortKey::TimeUsed)]
    fn sort_key_parses(#[case] input: &str, #[case] expected: SortKey) {
        assert_eq!(input.parse::<SortKey>().unwrap(), expected);
    }

    #[test]
    fn sort_key_distinguishes_unsortable_from_unknown() {
        assert!(matches!("subject".parse::<SortKey>(), Err(CoreError::NotSortable(_))));
        assert!(matches!(
            "colour".parse::<SortKey>(),
            Err(CoreError::UnknownValue { .. })
        ));
    }

    #[test]
    fn sort_config_parses_direction() {
        let config: SortConfig = "accuracy:asc".parse().unwrap();
        assert_eq!(config, SortConfig::new(SortKey::Accuracy, SortDirection::Asc));
        let config: SortConfig = "timeUsed".parse().unwrap();
        assert_eq!(config.direction, SortDirection::Desc);
    }

    #[test]
    fn default_criteria_is_inactive_and_valid() {
        let criteria = FilterCriteria::default();
        assert!(!criteria.is_active());
        assert!(criteria.validate().is_ok());
    }

    #[test]
    fn validate_catches_tampered_ranges() {
        let mut criteria = FilterCriteria::default();
        criteria.accuracy_range = Bounds { min: 90, max: 10 };
        assert!(criteria.validate().is_err());

        let mut criteria = FilterCriteria::default();
        criteria.accuracy_range = Bounds { min: 0, max: 150 };
        assert!(criteria.validate().is_err());
    }
}
