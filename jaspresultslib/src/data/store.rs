//! Column-major cell storage.
//!
//! Columns are sized independently and may be ragged until
//! [`ColumnStore::equalize`] pads the short ones with nulls.

use serde::{Deserialize, Serialize};

use super::cell::CellValue;

static NULL_CELL: CellValue = CellValue::Null;

/// Ordered columns of cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnStore {
    columns: Vec<Vec<CellValue>>,
}

impl ColumnStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from column-major cells
    pub fn from_columns(columns: Vec<Vec<CellValue>>) -> Self {
        Self { columns }
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if there are no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Drop every column
    pub fn clear(&mut self) {
        self.columns.clear();
    }

    /// All columns
    pub fn columns(&self) -> &[Vec<CellValue>] {
        &self.columns
    }

    /// One column, if it exists
    pub fn column(&self, index: usize) -> Option<&[CellValue]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    /// Length of a column; zero for columns that do not exist
    pub fn column_len(&self, index: usize) -> usize {
        self.columns.get(index).map_or(0, Vec::len)
    }

    /// Check if a column exists and holds at least one cell
    pub fn is_occupied(&self, index: usize) -> bool {
        self.column_len(index) > 0
    }

    /// Cell at a position; null outside the stored range
    pub fn cell(&self, col: usize, row: usize) -> &CellValue {
        self.columns
            .get(col)
            .and_then(|c| c.get(row))
            .unwrap_or(&NULL_CELL)
    }

    /// Length of the longest column
    pub fn max_len(&self) -> usize {
        self.columns.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Grow to at least `count` columns, adding empty ones
    pub fn ensure_columns(&mut self, count: usize) {
        if self.columns.len() < count {
            self.columns.resize_with(count, Vec::new);
        }
    }

    /// Append a column at the end
    pub fn push_column(&mut self, cells: Vec<CellValue>) -> usize {
        self.columns.push(cells);
        self.columns.len() - 1
    }

    /// Replace the contents of a column, creating it if needed
    pub fn set_column(&mut self, index: usize, cells: Vec<CellValue>) {
        self.ensure_columns(index + 1);
        self.columns[index] = cells;
    }

    /// Pad a column with nulls up to `len` cells; longer columns are untouched
    pub fn pad_column(&mut self, index: usize, len: usize) {
        self.ensure_columns(index + 1);
        let column = &mut self.columns[index];
        if column.len() < len {
            column.resize(len, CellValue::Null);
        }
    }

    /// Append cells to the end of a column, creating it if needed
    pub fn extend_column(&mut self, index: usize, cells: impl IntoIterator<Item = CellValue>) {
        self.ensure_columns(index + 1);
        self.columns[index].extend(cells);
    }

    /// Pad every column with nulls to the longest length and return that length
    pub fn equalize(&mut self) -> usize {
        let longest = self.max_len();
        for column in &mut self.columns {
            column.resize(longest, CellValue::Null);
        }
        longest
    }

    /// Consume into column-major cells
    pub fn into_columns(self) -> Vec<Vec<CellValue>> {
        self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Vec<CellValue> {
        values.iter().map(|v| CellValue::Int(*v)).collect()
    }

    #[test]
    fn test_cell_outside_range_is_null() {
        let store = ColumnStore::from_columns(vec![ints(&[1])]);
        assert_eq!(store.cell(0, 0), &CellValue::Int(1));
        assert!(store.cell(0, 5).is_null());
        assert!(store.cell(3, 0).is_null());
    }

    #[test]
    fn test_equalize_pads_with_null() {
        let mut store = ColumnStore::from_columns(vec![ints(&[1, 2, 3]), ints(&[4]), vec![]]);
        let len = store.equalize();

        assert_eq!(len, 3);
        for col in store.columns() {
            assert_eq!(col.len(), 3);
        }
        assert_eq!(store.column(0).unwrap(), ints(&[1, 2, 3]).as_slice());
        assert_eq!(store.cell(1, 0), &CellValue::Int(4));
        assert!(store.cell(1, 1).is_null());
        assert!(store.cell(1, 2).is_null());
        assert!(store.cell(2, 0).is_null());
    }

    #[test]
    fn test_equalize_empty_store() {
        let mut store = ColumnStore::new();
        assert_eq!(store.equalize(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_column_creates_gap_columns() {
        let mut store = ColumnStore::new();
        store.set_column(2, ints(&[7]));
        assert_eq!(store.len(), 3);
        assert!(!store.is_occupied(0));
        assert!(store.is_occupied(2));
    }

    #[test]
    fn test_pad_then_extend() {
        let mut store = ColumnStore::from_columns(vec![ints(&[1, 2])]);
        store.pad_column(1, 2);
        store.extend_column(1, ints(&[9]));
        assert_eq!(store.column_len(1), 3);
        assert!(store.cell(1, 0).is_null());
        assert_eq!(store.cell(1, 2), &CellValue::Int(9));
    }
}
