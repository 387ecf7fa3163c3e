//! Rectangular display grid and overtitle spans.
//!
//! A [`Grid`] is the presentation view of a table: formatted cells indexed
//! `[side][top]` with titles along both edges. Without transposition the
//! side runs over rows and the top over columns; transposed, columns run
//! down the side and carry their overtitles with them.

use crate::table::Table;

/// A run of adjacent positions sharing one overtitle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OvertitleSpan {
    /// The overtitle text
    pub label: String,
    /// First position covered
    pub start: usize,
    /// Last position covered, inclusive
    pub end: usize,
}

impl OvertitleSpan {
    /// Number of positions covered
    pub fn width(&self) -> usize {
        self.end - self.start + 1
    }

    /// Check if a position falls inside the span
    pub fn covers(&self, position: usize) -> bool {
        (self.start..=self.end).contains(&position)
    }
}

/// Merge contiguous runs of equal overtitles into spans.
///
/// A run is extended only when the next position directly follows it, so a
/// label that reappears after a gap opens a new span. Empty labels get no
/// span. Spans come out in the order they were opened.
pub fn overtitle_spans(overtitles: &[String]) -> Vec<OvertitleSpan> {
    let mut spans: Vec<OvertitleSpan> = Vec::new();

    for (position, label) in overtitles.iter().enumerate() {
        if label.is_empty() {
            continue;
        }

        let open = spans
            .iter_mut()
            .find(|span| span.label == *label && span.end + 1 == position);

        match open {
            Some(span) => span.end = position,
            None => spans.push(OvertitleSpan {
                label: label.clone(),
                start: position,
                end: position,
            }),
        }
    }

    spans
}

/// Formatted cells with titles along both edges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    /// Titles down the left edge
    pub side_titles: Vec<String>,
    /// Titles along the top edge
    pub top_titles: Vec<String>,
    /// Overtitle per side position, empty for none
    pub side_overtitles: Vec<String>,
    /// Overtitle per top position, empty for none
    pub top_overtitles: Vec<String>,
    /// Cells indexed `[side][top]`
    pub cells: Vec<Vec<String>>,
}

impl Grid {
    /// Build the display grid of a table, honouring its visibility and
    /// transposition flags.
    pub fn from_table(table: &Table) -> Self {
        let columns: Vec<usize> = (0..table.addressable_columns())
            .filter(|&col| table.is_column_visible(col))
            .collect();
        let rows = table.row_count();

        let col_titles: Vec<String> = columns.iter().map(|&c| table.col_title(c)).collect();
        let col_overtitles: Vec<String> = columns.iter().map(|&c| table.col_overtitle(c)).collect();
        let row_titles: Vec<String> = (0..rows).map(|r| table.row_title(r)).collect();
        let by_column: Vec<Vec<String>> = columns
            .iter()
            .map(|&c| (0..rows).map(|r| table.cell_formatted(c, r)).collect())
            .collect();

        let grid = Grid {
            side_titles: col_titles,
            top_titles: row_titles,
            side_overtitles: col_overtitles,
            top_overtitles: vec![String::new(); rows],
            cells: by_column,
        };

        if table.is_transposed() {
            grid
        } else {
            grid.transpose()
        }
    }

    /// Swap side and top.
    pub fn transpose(self) -> Self {
        let width = self.top_titles.len();
        let mut cells = vec![Vec::with_capacity(self.cells.len()); width];
        for side in self.cells {
            for (top, cell) in side.into_iter().enumerate() {
                cells[top].push(cell);
            }
        }

        Grid {
            side_titles: self.top_titles,
            top_titles: self.side_titles,
            side_overtitles: self.top_overtitles,
            top_overtitles: self.side_overtitles,
            cells,
        }
    }

    /// Check if there is nothing to lay out
    pub fn is_empty(&self) -> bool {
        self.side_titles.is_empty() || self.top_titles.is_empty()
    }

    /// Spans over the side titles
    pub fn side_spans(&self) -> Vec<OvertitleSpan> {
        overtitle_spans(&self.side_overtitles)
    }

    /// Spans over the top titles
    pub fn top_spans(&self) -> Vec<OvertitleSpan> {
        overtitle_spans(&self.top_overtitles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CellValue, TabularInput};
    use crate::table::ColumnInfo;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_adjacent_overtitles_merge() {
        let spans = overtitle_spans(&labels(&["G1", "G1", ""]));
        assert_eq!(
            spans,
            vec![OvertitleSpan {
                label: "G1".to_string(),
                start: 0,
                end: 1
            }]
        );
        assert_eq!(spans[0].width(), 2);
    }

    #[test]
    fn test_gap_opens_new_span() {
        let spans = overtitle_spans(&labels(&["A", "A", "B", "A", ""]));
        let ranges: Vec<(&str, usize, usize)> = spans
            .iter()
            .map(|s| (s.label.as_str(), s.start, s.end))
            .collect();
        assert_eq!(ranges, vec![("A", 0, 1), ("B", 2, 2), ("A", 3, 3)]);
    }

    #[test]
    fn test_grid_orientation() {
        let mut table = Table::new("t");
        table.add_column_info(ColumnInfo::new("a").overtitle("G"));
        table.add_column_info(ColumnInfo::new("b").overtitle("G"));
        table
            .add_rows(
                TabularInput::named([("a", CellValue::Int(1)), ("b", CellValue::Int(2))]),
                &[],
            )
            .unwrap();

        let grid = Grid::from_table(&table);
        assert_eq!(grid.top_titles, labels(&["a", "b"]));
        assert_eq!(grid.side_titles, labels(&["row0"]));
        assert_eq!(grid.cells, vec![labels(&["1", "2"])]);
        assert_eq!(grid.top_spans().len(), 1);
        assert!(grid.side_spans().is_empty());

        table.set_transpose(true);
        let grid = Grid::from_table(&table);
        assert_eq!(grid.side_titles, labels(&["a", "b"]));
        assert_eq!(grid.cells, vec![labels(&["1"]), labels(&["2"])]);
        assert_eq!(grid.side_spans()[0].width(), 2);
    }

    #[test]
    fn test_hidden_columns_are_not_laid_out() {
        let mut table = Table::new("t");
        table
            .add_columns(TabularInput::columns([
                ("x", vec![CellValue::Int(1)]),
                (".weights", vec![CellValue::Int(2)]),
            ]))
            .unwrap();
        let grid = Grid::from_table(&table);
        assert_eq!(grid.top_titles, labels(&["x"]));
    }
}
