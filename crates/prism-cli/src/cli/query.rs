//! Filter and sort flags shared by every command that derives entries.

use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::Args;
use prism_core::enums::{Difficulty, Pace, Subject};
use prism_core::query::{
    Bounds, DatePreset, DateSpan, MAX_ACCURACY, SortConfig, UNBOUNDED_MINUTES,
};
use prism_pipeline::{Clock, PipelineError, QueryState};

#[derive(Clone, Debug, Default, Args)]
pub struct QueryArgs {
    /// Keep only this subject (repeatable).
    #[arg(long = "subject")]
    pub subjects: Vec<Subject>,
    /// Keep only this entry type (repeatable).
    #[arg(long = "type")]
    pub types: Vec<String>,
    /// Keep only this pace (repeatable).
    #[arg(long = "pace")]
    pub paces: Vec<Pace>,
    /// Keep only this difficulty (repeatable).
    #[arg(long = "difficulty")]
    pub difficulties: Vec<Difficulty>,
    /// Accuracy percent as MIN..MAX; either side may be left out.
    #[arg(long)]
    pub accuracy: Option<String>,
    /// Time used in minutes as MIN..MAX.
    #[arg(long)]
    pub minutes: Option<String>,
    /// Relative date range, e.g. "last 7 days" (repeatable).
    #[arg(long = "preset")]
    pub presets: Vec<DatePreset>,
    /// Earliest completion date (RFC 3339 or YYYY-MM-DD).
    #[arg(long)]
    pub from: Option<String>,
    /// Latest completion date (RFC 3339 or YYYY-MM-DD, inclusive).
    #[arg(long)]
    pub to: Option<String>,
    /// Sort as `key` or `key:asc|desc`.
    #[arg(long)]
    pub sort: Option<SortConfig>,
}

/// Parsed, pre-validated query flags. Only dimensions that were given are
/// applied, so saved filters for other dimensions survive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryPatch {
    pub subjects: Vec<Subject>,
    pub types: Vec<String>,
    pub paces: Vec<Pace>,
    pub difficulties: Vec<Difficulty>,
    pub accuracy: Option<Bounds<u8>>,
    pub minutes: Option<Bounds<u32>>,
    pub presets: Vec<DatePreset>,
    pub dates: Option<DateSpan>,
    pub sort: Option<SortConfig>,
}

impl QueryArgs {
    /// Parse the free-form range and date flags.
    ///
    /// # Errors
    ///
    /// Returns an error naming the flag whose value is malformed or reversed.
    pub fn to_patch(&self) -> anyhow::Result<QueryPatch> {
        let accuracy = self
            .accuracy
            .as_deref()
            .map(|raw| {
                let full = Bounds {
                    min: 0,
                    max: MAX_ACCURACY,
                };
                let parsed = Bounds::parse("accuracyRange", raw, full)?;
                anyhow::Ok(Bounds::clamped(parsed.min, parsed.max, 0, MAX_ACCURACY))
            })
            .transpose()
            .context("invalid --accuracy")?;

        let minutes = self
            .minutes
            .as_deref()
            .map(|raw| {
                let full = Bounds {
                    min: 0,
                    max: UNBOUNDED_MINUTES,
                };
                Bounds::parse("timeRange", raw, full)
            })
            .transpose()
            .context("invalid --minutes")?;

        let dates = if self.from.is_some() || self.to.is_some() {
            let start = match self.from.as_deref() {
                Some(raw) => parse_instant(raw, false).context("invalid --from")?,
                None => DateTime::<Utc>::MIN_UTC,
            };
            let end = match self.to.as_deref() {
                Some(raw) => parse_instant(raw, true).context("invalid --to")?,
                None => DateTime::<Utc>::MAX_UTC,
            };
            Some(DateSpan::new(start, end).context("invalid --from/--to")?)
        } else {
            None
        };

        Ok(QueryPatch {
            subjects: self.subjects.clone(),
            types: self.types.clone(),
            paces: self.paces.clone(),
            difficulties: self.difficulties.clone(),
            accuracy,
            minutes,
            presets: self.presets.clone(),
            dates,
            sort: self.sort,
        })
    }
}

impl QueryPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Push every given dimension through the validated setters.
    ///
    /// # Errors
    ///
    /// Propagates the first rejected setter.
    pub fn apply(&self, query: &mut QueryState, clock: &dyn Clock) -> Result<(), PipelineError> {
        if !self.subjects.is_empty() {
            query.set_subjects(self.subjects.iter().copied());
        }
        if !self.types.is_empty() {
            query.set_types(self.types.iter().cloned());
        }
        if !self.paces.is_empty() {
            query.set_paces(self.paces.iter().copied());
        }
        if !self.difficulties.is_empty() {
            query.set_difficulties(self.difficulties.iter().copied());
        }
        if let Some(range) = self.accuracy {
            query.set_accuracy_range(range.min, range.max)?;
        }
        if let Some(range) = self.minutes {
            query.set_time_range_minutes(range.min, range.max)?;
        }
        if !self.presets.is_empty() {
            query.set_date_presets(self.presets.iter().copied(), clock);
        }
        if let Some(span) = self.dates {
            query.set_explicit_dates(span.start, span.end)?;
        }
        if let Some(sort) = self.sort {
            query.set_sort(sort);
        }
        Ok(())
    }
}

/// A bare date means the start of that UTC day, or its last instant when
/// `end_of_day` is set.
fn parse_instant(raw: &str, end_of_day: bool) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.with_timezone(&Utc));
    }
    let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("'{raw}' is neither RFC 3339 nor YYYY-MM-DD"))?;
    let time = if end_of_day {
        NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
    } else {
        NaiveTime::from_hms_opt(0, 0, 0)
    }
    .context("time of day out of range")?;
    Ok(day.and_time(time).and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use prism_core::enums::SortDirection;
    use prism_core::query::{FilterCriteria, SortKey};
    use prism_pipeline::FixedClock;

    use super::*;

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap())
    }

    #[test]
    fn no_flags_is_an_empty_patch() {
        let patch = QueryArgs::default().to_patch().unwrap();
        assert!(patch.is_empty());
        let mut query = QueryState::default();
        patch.apply(&mut query, &clock()).unwrap();
        assert_eq!(query, QueryState::default());
    }

    #[test]
    fn accuracy_is_clamped_and_open_ended() {
        let args = QueryArgs {
            accuracy: Some("40..150".into()),
            ..QueryArgs::default()
        };
        assert_eq!(args.to_patch().unwrap().accuracy, Some(Bounds { min: 40, max: 100 }));

        let args = QueryArgs {
            accuracy: Some("..80".into()),
            ..QueryArgs::default()
        };
        assert_eq!(args.to_patch().unwrap().accuracy, Some(Bounds { min: 0, max: 80 }));
    }

    #[test]
    fn reversed_range_names_the_flag() {
        let args = QueryArgs {
            minutes: Some("30..5".into()),
            ..QueryArgs::default()
        };
        let err = args.to_patch().unwrap_err();
        assert!(format!("{err:#}").contains("--minutes"));
    }

    #[test]
    fn bare_dates_cover_whole_days() {
        let args = QueryArgs {
            from: Some("2026-03-01".into()),
            to: Some("2026-03-02".into()),
            ..QueryArgs::default()
        };
        let span = args.to_patch().unwrap().dates.unwrap();
        assert_eq!(span.start, Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap());
        assert!(span.contains(Utc.with_ymd_and_hms(2026, 3, 2, 23, 59, 59).unwrap()));
        assert!(!span.contains(Utc.with_ymd_and_hms(2026, 3, 3, 0, 0, 0).unwrap()));
    }

    #[test]
    fn rfc3339_dates_are_accepted() {
        let args = QueryArgs {
            from: Some("2026-03-01T08:30:00+02:00".into()),
            ..QueryArgs::default()
        };
        let span = args.to_patch().unwrap().dates.unwrap();
        assert_eq!(span.start, Utc.with_ymd_and_hms(2026, 3, 1, 6, 30, 0).unwrap());
        assert_eq!(span.end, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn malformed_date_is_rejected() {
        let args = QueryArgs {
            to: Some("03/02/2026".into()),
            ..QueryArgs::default()
        };
        assert!(args.to_patch().is_err());
    }

    #[test]
    fn patch_only_touches_given_dimensions() {
        let mut query = QueryState::default();
        query.set_paces([Pace::Slow]);

        let args = QueryArgs {
            subjects: vec![Subject::Math],
            presets: vec![DatePreset::Last7Days],
            sort: Some(SortConfig::new(SortKey::Accuracy, SortDirection::Asc)),
            ..QueryArgs::default()
        };
        args.to_patch().unwrap().apply(&mut query, &clock()).unwrap();

        let filters: &FilterCriteria = query.filters();
        assert_eq!(filters.subjects, [Subject::Math].into());
        assert_eq!(filters.paces, [Pace::Slow].into());
        assert_eq!(
            filters.dates.presets[0].span,
            DatePreset::Last7Days.resolve(clock().now())
        );
        assert_eq!(query.sort().key, SortKey::Accuracy);
    }
}
