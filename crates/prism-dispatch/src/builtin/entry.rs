use std::collections::BTreeMap;

use prism_core::entities::PracticeEntry;
use prism_core::enums::Subject;

use super::{align, marker};
use crate::error::RenderError;
use crate::family::{BaseProps, EntryView};

fn date(entry: &PracticeEntry) -> String {
    entry.date_completed.format("%Y-%m-%d").to_string()
}

fn by_subject<'a>(entries: &'a [PracticeEntry]) -> BTreeMap<Subject, Vec<&'a PracticeEntry>> {
    let mut groups: BTreeMap<Subject, Vec<&PracticeEntry>> = BTreeMap::new();
    for entry in entries {
        groups.entry(entry.subject).or_default().push(entry);
    }
    groups
}

/// One line per session.
#[derive(Debug, Clone, Copy)]
pub struct CardList;

impl EntryView for CardList {
    fn render(&self, props: &BaseProps<'_>) -> Result<String, RenderError> {
        Ok(props
            .entries
            .iter()
            .map(|e| {
                format!(
                    "{} {}  {} / {}  {}%  {}m  {}",
                    marker(props.is_selected(&e.id)),
                    e.id,
                    e.subject,
                    e.entry_type,
                    e.accuracy,
                    e.time_used_minutes(),
                    date(e)
                )
            })
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DataTable;

impl EntryView for DataTable {
    fn render(&self, props: &BaseProps<'_>) -> Result<String, RenderError> {
        if props.entries.is_empty() {
            return Ok(String::new());
        }
        let rows: Vec<Vec<String>> = props
            .entries
            .iter()
            .map(|e| {
                vec![
                    marker(props.is_selected(&e.id)).to_owned(),
                    e.id.clone(),
                    e.subject.to_string(),
                    e.entry_type.clone(),
                    format!("{}%", e.accuracy),
                    format!("{}m", e.time_used_minutes()),
                    e.pace.to_string(),
                    e.difficulty.to_string(),
                    e.question_count().to_string(),
                    date(e),
                ]
            })
            .collect();
        Ok(align(
            &[
                "", "ID", "SUBJECT", "TYPE", "ACC", "TIME", "PACE", "DIFF", "QS", "DATE",
            ],
            &rows,
        ))
    }
}

/// Columns per subject, in subject order.
#[derive(Debug, Clone, Copy)]
pub struct SubjectBoard;

impl EntryView for SubjectBoard {
    fn render(&self, props: &BaseProps<'_>) -> Result<String, RenderError> {
        let mut out = Vec::new();
        for (subject, entries) in by_subject(props.entries) {
            out.push(format!("== {subject} ({}) ==", entries.len()));
            out.extend(entries.iter().map(|e| {
                format!(
                    "{} {} {}%  {}",
                    marker(props.is_selected(&e.id)),
                    e.id,
                    e.accuracy,
                    date(e)
                )
            }));
        }
        Ok(out.join("\n"))
    }
}

/// Aggregates per subject; no per-entry rows.
#[derive(Debug, Clone, Copy)]
pub struct Scoreboard;

impl EntryView for Scoreboard {
    fn render(&self, props: &BaseProps<'_>) -> Result<String, RenderError> {
        let rows: Vec<Vec<String>> = by_subject(props.entries)
            .into_iter()
            .map(|(subject, entries)| {
                let sessions = entries.len();
                let accuracy_sum: usize = entries.iter().map(|e| usize::from(e.accuracy)).sum();
                let minutes: u64 = entries.iter().map(|e| u64::from(e.time_used_minutes())).sum();
                vec![
                    subject.to_string(),
                    sessions.to_string(),
                    format!("{}%", accuracy_sum / sessions),
                    format!("{minutes}m"),
                ]
            })
            .collect();
        if rows.is_empty() {
            return Ok(String::new());
        }
        Ok(align(&["SUBJECT", "SESSIONS", "AVG ACC", "TIME"], &rows))
    }
}
