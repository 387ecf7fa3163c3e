//! Monospaced text rendering.
//!
//! Layout of a rendered grid (prefix omitted):
//!
//! ```text
//!         Group
//!         a    b
//!       |----|-----|
//! row0  | 1  | 22  |
//!       |----|-----|
//! ```
//!
//! Every top position has one width shared by its title and its cells; a
//! top overtitle wider than its span widens the spanned positions.

use crate::data::{Footnote, Status};
use crate::table::Table;

use super::grid::{Grid, OvertitleSpan};

fn width(s: &str) -> usize {
    s.chars().count()
}

fn pad(s: &str, to: usize) -> String {
    format!("{:<width$}", s, width = to)
}

impl Table {
    /// Render the table as monospaced text, every line starting with `prefix`.
    pub fn to_text(&self, prefix: &str) -> String {
        let mut out = String::new();
        header_to_text(&mut out, prefix, &self.title, self.status);

        if self.has_error() {
            error_to_text(&mut out, prefix, &self.error, &self.error_message);
        } else {
            grid_to_text(&mut out, prefix, &Grid::from_table(self));
        }

        footnotes_to_text(&mut out, prefix, &self.footnotes);
        out
    }
}

/// Title (when set) and status lines.
pub(crate) fn header_to_text(out: &mut String, prefix: &str, title: &str, status: Status) {
    if !title.is_empty() {
        out.push_str(&format!("{}{}\n", prefix, title));
    }
    out.push_str(&format!("{}status: {}\n", prefix, status));
}

/// The error line of an element in the error state.
pub(crate) fn error_to_text(out: &mut String, prefix: &str, error: &str, message: &str) {
    out.push_str(prefix);
    if !error.is_empty() {
        out.push_str(&format!("error: '{}'", error));
    }
    if !message.is_empty() {
        let label = if error.is_empty() { "errormessage: '" } else { " msg: '" };
        out.push_str(&format!("{}{}'", label, message));
    }
    out.push('\n');
}

/// Footnote block; nothing when there are no footnotes.
pub(crate) fn footnotes_to_text(out: &mut String, prefix: &str, footnotes: &[Footnote]) {
    if footnotes.is_empty() {
        return;
    }

    out.push_str(&format!("\n{}footnotes:\n", prefix));
    for note in footnotes {
        let symbol = if note.symbol.is_empty() {
            String::new()
        } else {
            format!("({}) ", note.symbol)
        };
        out.push_str(&format!("{}\t{}'{}'\n", prefix, symbol, note.text));
    }
}

/// Lay out a grid; an empty grid renders nothing.
pub fn grid_to_text(out: &mut String, prefix: &str, grid: &Grid) {
    if grid.is_empty() {
        return;
    }

    let side_spans = grid.side_spans();
    let top_spans = grid.top_spans();

    // Side overtitles occupy their own column left of the side titles.
    let side_overtitle_width = side_spans
        .iter()
        .map(|span| width(&span.label) + 1)
        .max()
        .unwrap_or(0);
    let side_width = grid.side_titles.iter().map(|t| width(t)).max().unwrap_or(0);
    let side_labels: Vec<String> = (0..grid.side_titles.len())
        .map(|side| match span_starting_at(&side_spans, side) {
            Some(span) => pad(&span.label, side_overtitle_width),
            None => " ".repeat(side_overtitle_width),
        })
        .collect();

    // One width per top position: the widest of the titles and its cells.
    let title_width = grid.top_titles.iter().map(|t| width(t)).max().unwrap_or(0);
    let mut widths: Vec<usize> = (0..grid.top_titles.len())
        .map(|top| {
            grid.cells
                .iter()
                .map(|row| row.get(top).map_or(0, |c| width(c)))
                .max()
                .unwrap_or(0)
                .max(title_width)
        })
        .collect();

    for span in &top_spans {
        let needed = width(&span.label) + 2;
        loop {
            let spanned: usize =
                widths[span.start..=span.end].iter().sum::<usize>() + 3 * (span.width() - 1);
            if spanned >= needed {
                break;
            }
            for w in &mut widths[span.start..=span.end] {
                *w += 1;
            }
        }
    }

    let indent = " ".repeat(side_overtitle_width + side_width);

    if !top_spans.is_empty() {
        let mut line = format!("{}{}    ", prefix, indent);
        let mut written = 0;
        let mut column_end = 0;
        for (top, w) in widths.iter().enumerate() {
            if let Some(span) = span_starting_at(&top_spans, top) {
                line.push_str(&span.label);
                written += width(&span.label);
            }
            column_end += w + 3;
            if written < column_end {
                line.push_str(&" ".repeat(column_end - written));
                written = column_end;
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    let titles: Vec<String> = grid
        .top_titles
        .iter()
        .zip(&widths)
        .map(|(title, &w)| pad(title, w))
        .collect();
    let line = format!("{}{}    {}", prefix, indent, titles.join("   "));
    out.push_str(line.trim_end());
    out.push('\n');

    let dashes: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    let separator = format!("{}{}  |-{}-|\n", prefix, indent, dashes.join("-|-"));

    for (side, row) in grid.cells.iter().enumerate() {
        out.push_str(&separator);
        let cells: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(top, &w)| pad(row.get(top).map_or("", String::as_str), w))
            .collect();
        out.push_str(&format!(
            "{}{}{}  | {} |\n",
            prefix,
            side_labels[side],
            pad(&grid.side_titles[side], side_width),
            cells.join(" | ")
        ));
    }
    out.push_str(&separator);
}

fn span_starting_at(spans: &[OvertitleSpan], position: usize) -> Option<&OvertitleSpan> {
    spans.iter().find(|span| span.start == position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CellValue, TabularInput};
    use crate::table::ColumnInfo;

    fn sample() -> Table {
        let mut table = Table::new("Descriptives");
        table.add_column_info(ColumnInfo::new("a"));
        table.add_column_info(ColumnInfo::new("b"));
        table
            .add_rows(
                TabularInput::named([("a", CellValue::Int(1)), ("b", CellValue::Int(22))]),
                &[],
            )
            .unwrap();
        table
    }

    #[test]
    fn test_plain_layout() {
        let text = sample().to_text("");
        let expected = "\
Descriptives
status: complete
        a   b
      |---|----|
row0  | 1 | 22 |
      |---|----|
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_prefix_on_every_line() {
        let text = sample().to_text("> ");
        assert!(text.lines().all(|line| line.starts_with("> ")));
    }

    #[test]
    fn test_overtitle_line_and_widening() {
        let mut table = Table::new("");
        table.add_column_info(ColumnInfo::new("a").overtitle("Confidence"));
        table.add_column_info(ColumnInfo::new("b").overtitle("Confidence"));
        table
            .add_rows(TabularInput::named([("a", 1), ("b", 2)]), &[])
            .unwrap();

        let text = table.to_text("");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "status: complete");
        assert_eq!(lines[1], "        Confidence");

        // "Confidence  " needs 12 chars over two columns joined by " | "
        assert_eq!(lines[3], "      |-------|-------|");
        assert_eq!(lines[4], "row0  | 1     | 2     |");
    }

    #[test]
    fn test_error_replaces_grid() {
        let mut table = sample();
        table.set_error("", "could not compute");
        table
            .add_footnote(Some("see log"), Some("a"), &[], &[])
            .unwrap();

        let text = table.to_text("");
        assert_eq!(
            text,
            "Descriptives\nstatus: error\nerrormessage: 'could not compute'\n\nfootnotes:\n\t(a) 'see log'\n"
        );

        table.set_error("Singular", "could not compute");
        assert!(table
            .to_text("")
            .contains("error: 'Singular' msg: 'could not compute'"));
    }

    #[test]
    fn test_empty_table_renders_header_only() {
        assert_eq!(Table::new("").to_text(""), "status: complete\n");
    }
}
