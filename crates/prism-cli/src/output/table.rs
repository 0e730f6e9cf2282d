//! Plain aligned tables for `--format table`.

const MIN_COLUMN: usize = 6;
const GAP: &str = "  ";

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render headers and string rows as aligned columns. Numeric cells are
/// right-aligned; cells wider than their column end in `…`.
#[must_use]
pub fn render_entity_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let floors: Vec<usize> = headers
        .iter()
        .map(|header| header.chars().count().max(MIN_COLUMN))
        .collect();
    let mut widths: Vec<usize> = floors
        .iter()
        .enumerate()
        .map(|(index, &floor)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .fold(floor, usize::max)
        })
        .collect();

    if let Some(max_width) = options.max_width {
        shrink_to_fit(&mut widths, &floors, max_width);
    }

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, &width)| pad(&truncate(header, width), width, false))
        .collect::<Vec<_>>()
        .join(GAP);

    let divider = "-".repeat(header_line.chars().count());
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);

    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, &width)| {
                let text = truncate(row.get(index).map_or("-", String::as_str), width);
                let cell = pad(&text, width, looks_numeric(&text));
                if options.color { colorize(&cell, &text) } else { cell }
            })
            .collect::<Vec<_>>()
            .join(GAP);
        lines.push(line);
    }

    lines.join("\n")
}

/// Take one column off the widest shrinkable column until the table fits or
/// every column sits at its floor.
fn shrink_to_fit(widths: &mut [usize], floors: &[usize], max_width: usize) {
    let gaps = widths.len().saturating_sub(1) * GAP.len();
    while widths.iter().sum::<usize>() + gaps > max_width {
        let widest = widths
            .iter()
            .zip(floors)
            .enumerate()
            .filter(|(_, (width, floor))| width > floor)
            .max_by_key(|(_, (width, _))| **width)
            .map(|(index, _)| index);
        let Some(index) = widest else {
            break;
        };
        widths[index] -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    if right_align {
        format!("{value:>width$}")
    } else {
        format!("{value:<width$}")
    }
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.'))
        && trimmed.chars().any(|ch| ch.is_ascii_digit())
}

/// Color a padded cell by its outcome word. Padding stays outside the escape.
fn colorize(cell: &str, text: &str) -> String {
    let code = match text.to_ascii_lowercase().as_str() {
        "true" | "correct" | "ready" => "32",
        "skipped" | "loading" => "33",
        "false" | "wrong" | "fallback" => "31",
        _ => return cell.to_string(),
    };
    cell.replacen(text, &format!("\u{1b}[{code}m{text}\u{1b}[0m"), 1)
}
