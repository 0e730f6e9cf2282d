//! Plain-text reference variants.
//!
//! Ids match the registry catalog. Decorative catalog entries have no
//! implementation here and resolve to a fallback.

mod entry;
mod question;
mod timeline;

use std::sync::Arc;

use crate::family::{EntryView, QuestionView, TimelineView};

pub use entry::{CardList, DataTable, Scoreboard, SubjectBoard};
pub use question::{QuestionLedger, TopicBreakdown};
pub use timeline::{Chronicle, DayCalendar};

#[must_use]
pub fn entry_view(id: u32) -> Option<Arc<dyn EntryView>> {
    let view: Arc<dyn EntryView> = match id {
        1 => Arc::new(CardList),
        2 => Arc::new(DataTable),
        3 => Arc::new(SubjectBoard),
        4 => Arc::new(Scoreboard),
        _ => return None,
    };
    Some(view)
}

#[must_use]
pub fn question_view(id: u32) -> Option<Arc<dyn QuestionView>> {
    let view: Arc<dyn QuestionView> = match id {
        1 => Arc::new(QuestionLedger),
        2 => Arc::new(TopicBreakdown),
        _ => return None,
    };
    Some(view)
}

#[must_use]
pub fn timeline_view(id: u32) -> Option<Arc<dyn TimelineView>> {
    let view: Arc<dyn TimelineView> = match id {
        1 => Arc::new(Chronicle),
        2 => Arc::new(DayCalendar),
        _ => return None,
    };
    Some(view)
}

/// Selection marker for list-style variants.
const fn marker(selected: bool) -> &'static str {
    if selected { ">" } else { " " }
}

/// Pad every column to its widest cell. Mirrors the CLI table renderer.
fn align(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut out = vec![padded(headers.iter().copied(), &widths)];
    out.extend(rows.iter().map(|row| padded(row.iter().map(String::as_str), &widths)));
    out.join("\n")
}

fn padded<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_owned()
}
