//! HTML rendering.
//!
//! Overtitles become header cells spanning their run with `colspan` (top)
//! or `rowspan` (side). All text is escaped.

use crate::data::{Footnote, Status};
use crate::table::Table;

use super::grid::{Grid, OvertitleSpan};

/// Escape text for use inside HTML elements and attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

impl Table {
    /// Render the table as an HTML fragment.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        open_element(&mut out, self.status, "jaspTable", &self.title);

        if self.has_error() {
            error_to_html(&mut out, &self.error, &self.error_message);
        } else {
            grid_to_html(&mut out, &Grid::from_table(self));
        }

        footnotes_to_html(&mut out, &self.footnotes);
        out.push_str("</div>\n");
        out
    }
}

/// Opening `<div>` and title of a result element.
pub(crate) fn open_element(out: &mut String, status: Status, class: &str, title: &str) {
    out.push_str(&format!("<div class=\"status {} {}\">\n", status, class));
    out.push_str(&format!("<h2>{}</h2>\n", escape(title)));
}

pub(crate) fn error_to_html(out: &mut String, error: &str, message: &str) {
    out.push_str("<p class=\"error\">\n");
    if !error.is_empty() {
        out.push_str(&format!("error: <i>'{}'</i>", escape(error)));
    }
    if !message.is_empty() {
        let label = if error.is_empty() { "errormessage: " } else { " msg: " };
        out.push_str(&format!("{}<i>'{}'</i>", label, escape(message)));
    }
    out.push_str("\n</p>\n");
}

pub(crate) fn footnotes_to_html(out: &mut String, footnotes: &[Footnote]) {
    if footnotes.is_empty() {
        return;
    }

    out.push_str("<h4>footnotes</h4>\n<ul>\n");
    for note in footnotes {
        let symbol = if note.symbol.is_empty() {
            String::new()
        } else {
            format!("<i>({})</i> ", escape(&note.symbol))
        };
        out.push_str(&format!("<li>{}{}</li>\n", symbol, escape(&note.text)));
    }
    out.push_str("</ul>\n");
}

/// Emit a `<table>` for a grid; an empty grid gives a placeholder table.
pub fn grid_to_html(out: &mut String, grid: &Grid) {
    if grid.is_empty() {
        out.push_str("\t<table>empty</table>\n");
        return;
    }

    let top_spans = grid.top_spans();
    let side_spans = grid.side_spans();
    let corner_span = if side_spans.is_empty() { 1 } else { 2 };

    out.push_str("\t<table>\n");

    if !top_spans.is_empty() {
        out.push_str("\t\t<tr>\n");
        out.push_str(&format!(
            "\t\t\t<th rowspan=\"2\" colspan=\"{}\"></th>\n",
            corner_span
        ));
        for top in 0..grid.top_titles.len() {
            match spanning(&top_spans, top) {
                Some(span) if span.start == top => out.push_str(&format!(
                    "\t\t\t<th colspan=\"{}\">{}</th>\n",
                    span.width(),
                    escape(&span.label)
                )),
                Some(_) => {}
                None => out.push_str("\t\t\t<th></th>\n"),
            }
        }
        out.push_str("\t\t</tr>\n");
    }

    out.push_str("\t\t<tr>\n");
    if top_spans.is_empty() {
        out.push_str(&format!("\t\t\t<th colspan=\"{}\"></th>\n", corner_span));
    }
    for title in &grid.top_titles {
        out.push_str(&format!("\t\t\t<th>{}</th>\n", escape(title)));
    }
    out.push_str("\t\t</tr>\n");

    for (side, row) in grid.cells.iter().enumerate() {
        out.push_str("\t\t<tr>\n");

        if !side_spans.is_empty() {
            match spanning(&side_spans, side) {
                Some(span) if span.start == side => out.push_str(&format!(
                    "\t\t\t<th rowspan=\"{}\">{}</th>\n",
                    span.width(),
                    escape(&span.label)
                )),
                Some(_) => {}
                None => out.push_str("\t\t\t<th></th>\n"),
            }
        }

        out.push_str(&format!("\t\t\t<th>{}</th>\n", escape(&grid.side_titles[side])));
        for cell in row {
            out.push_str(&format!("\t\t\t<td>{}</td>\n", escape(cell)));
        }
        out.push_str("\t\t</tr>\n");
    }

    out.push_str("\t</table>\n");
}

fn spanning(spans: &[OvertitleSpan], position: usize) -> Option<&OvertitleSpan> {
    spans.iter().find(|span| span.covers(position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TabularInput;
    use crate::table::ColumnInfo;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_empty_table() {
        let html = Table::new("Nothing yet").to_html();
        assert_eq!(
            html,
            "<div class=\"status complete jaspTable\">\n<h2>Nothing yet</h2>\n\t<table>empty</table>\n</div>\n"
        );
    }

    #[test]
    fn test_top_overtitle_colspan() {
        let mut table = Table::new("t");
        table.add_column_info(ColumnInfo::new("lo").overtitle("95% CI"));
        table.add_column_info(ColumnInfo::new("hi").overtitle("95% CI"));
        table.add_column_info(ColumnInfo::new("p"));
        table
            .add_rows(TabularInput::named([("lo", 1), ("hi", 2), ("p", 3)]), &[])
            .unwrap();

        let html = table.to_html();
        assert!(html.contains("<th rowspan=\"2\" colspan=\"1\"></th>"));
        assert!(html.contains("<th colspan=\"2\">95% CI</th>"));
        assert!(html.contains("<td>3</td>"));
        assert_eq!(html.matches("<tr>").count(), 3);
    }

    #[test]
    fn test_side_overtitle_rowspan_when_transposed() {
        let mut table = Table::new("t");
        table.add_column_info(ColumnInfo::new("lo").overtitle("CI"));
        table.add_column_info(ColumnInfo::new("hi").overtitle("CI"));
        table
            .add_rows(TabularInput::named([("lo", 1), ("hi", 2)]), &[])
            .unwrap();
        table.set_transpose(true);

        let html = table.to_html();
        assert!(html.contains("<th colspan=\"2\"></th>"));
        assert!(html.contains("<th rowspan=\"2\">CI</th>"));
    }

    #[test]
    fn test_error_and_footnotes() {
        let mut table = Table::new("t");
        table.set_error("Failed", "<bad>");
        table.add_footnote(Some("note"), Some("*"), &[], &[]).unwrap();

        let html = table.to_html();
        assert!(html.starts_with("<div class=\"status error jaspTable\">"));
        assert!(html.contains("error: <i>'Failed'</i> msg: <i>'&lt;bad&gt;'</i>"));
        assert!(html.contains("<li><i>(*)</i> note</li>"));
        assert!(!html.contains("<table>"));
    }
}
