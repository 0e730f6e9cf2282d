use std::collections::BTreeMap;

use chrono::NaiveDate;
use prism_core::entities::PracticeEntry;
use prism_core::enums::SortDirection;
use prism_core::query::SortKey;

use super::marker;
use crate::error::RenderError;
use crate::family::{TimelineProps, TimelineView};

/// Entries in the order the pipeline produced them, numbered.
#[derive(Debug, Clone, Copy)]
pub struct Chronicle;

impl TimelineView for Chronicle {
    fn render(&self, props: &TimelineProps<'_>) -> Result<String, RenderError> {
        if props.base.entries.is_empty() {
            return Ok(String::new());
        }
        let mut out = vec![format!("ordered by {}", props.sort)];
        out.extend(props.base.entries.iter().enumerate().map(|(i, e)| {
            format!(
                "{} {:>3}. {}  {}  {} {}%",
                marker(props.base.is_selected(&e.id)),
                i + 1,
                e.date_completed.format("%Y-%m-%d %H:%M"),
                e.id,
                e.subject,
                e.accuracy
            )
        }));
        Ok(out.join("\n"))
    }
}

/// Sessions bucketed by UTC calendar day. Day order follows the sort
/// direction when sorting by date, otherwise newest first.
#[derive(Debug, Clone, Copy)]
pub struct DayCalendar;

impl TimelineView for DayCalendar {
    fn render(&self, props: &TimelineProps<'_>) -> Result<String, RenderError> {
        let mut days: BTreeMap<NaiveDate, Vec<&PracticeEntry>> = BTreeMap::new();
        for entry in props.base.entries {
            days.entry(entry.date_completed.date_naive())
                .or_default()
                .push(entry);
        }

        let ascending =
            props.sort.key == SortKey::DateCompleted && props.sort.direction == SortDirection::Asc;
        let line = |(day, entries): (&NaiveDate, &Vec<&PracticeEntry>)| {
            let ids: Vec<String> = entries
                .iter()
                .map(|e| format!("{}{}", e.id, if props.base.is_selected(&e.id) { "*" } else { "" }))
                .collect();
            format!("{day}  [{}]  {}", entries.len(), ids.join(", "))
        };

        let lines: Vec<String> = if ascending {
            days.iter().map(line).collect()
        } else {
            days.iter().rev().map(line).collect()
        };
        Ok(lines.join("\n"))
    }
}
