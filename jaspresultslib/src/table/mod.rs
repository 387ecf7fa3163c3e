//! The results table.
//!
//! A `Table` accumulates analysis output incrementally. Data arrives through
//! the mutation engine (`set_data`, `set_column`, `add_columns`, `add_rows`),
//! column declarations through `add_column_info`, and annotations through
//! `add_footnote`. The finished table is rendered to text or HTML, exported
//! as a display document, or snapshotted for caching.
//!
//! The pipeline is:
//! 1. Mutation (column store, axes and metadata updated)
//! 2. Snapshot / restore (full-fidelity JSON)
//! 3. Presentation (display document, text, HTML)

pub mod document;
pub mod metadata;
pub mod mutate;
pub mod snapshot;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::data::{
    AxisKind, CellValue, ColRowCombination, ColumnStore, ColumnType, Footnote, NamedAxis, Status,
};
use crate::output::format::format_cell;

pub use document::{ErrorEntry, Schema, SchemaField, TableDocument};
pub use metadata::Metadata;
pub use snapshot::{NonFinite, NonFiniteCell, TableSnapshot};

/// Columns whose name starts with this marker are internal and never shown.
pub const HIDDEN_COLUMN_MARKER: char = '.';

/// Declaration of a column: its name and display metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnInfo {
    /// Column name; a default name is generated when absent
    pub name: Option<String>,
    /// Display title
    pub title: Option<String>,
    /// Declared type, overriding inference
    #[serde(rename = "type")]
    pub col_type: Option<String>,
    /// Format spec
    pub format: Option<String>,
    /// Combine flag
    pub combine: Option<bool>,
    /// Overtitle
    pub overtitle: Option<String>,
}

impl ColumnInfo {
    /// Declaration of a named column
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Declaration of a column that gets a generated name
    pub fn unnamed() -> Self {
        Self::default()
    }

    /// Builder: set the title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder: set the declared type
    pub fn col_type(mut self, col_type: impl Into<String>) -> Self {
        self.col_type = Some(col_type.into());
        self
    }

    /// Builder: set the format spec
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Builder: set the combine flag
    pub fn combine(mut self, combine: bool) -> Self {
        self.combine = Some(combine);
        self
    }

    /// Builder: set the overtitle
    pub fn overtitle(mut self, overtitle: impl Into<String>) -> Self {
        self.overtitle = Some(overtitle.into());
        self
    }
}

/// A results table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub(crate) title: String,
    pub(crate) status: Status,
    pub(crate) error: String,
    pub(crate) error_message: String,
    pub(crate) footnotes: Vec<Footnote>,
    pub(crate) combinations: Vec<ColRowCombination>,
    pub(crate) transpose_table: bool,
    pub(crate) transpose_with_overtitle: bool,
    pub(crate) show_specified_columns_only: bool,
    pub(crate) specified_columns: BTreeSet<String>,
    pub(crate) col_names: NamedAxis,
    pub(crate) row_names: NamedAxis,
    pub(crate) metadata: Metadata,
    pub(crate) data: ColumnStore,
}

impl Default for Table {
    fn default() -> Self {
        Self::new("")
    }
}

impl Table {
    /// Create an empty table
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status: Status::default(),
            error: String::new(),
            error_message: String::new(),
            footnotes: Vec::new(),
            combinations: Vec::new(),
            transpose_table: false,
            transpose_with_overtitle: false,
            show_specified_columns_only: false,
            specified_columns: BTreeSet::new(),
            col_names: NamedAxis::columns(),
            row_names: NamedAxis::rows(),
            metadata: Metadata::default(),
            data: ColumnStore::new(),
        }
    }

    /// Table title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Change the title
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Progress state
    pub fn status(&self) -> Status {
        self.status
    }

    /// Change the progress state
    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// Mark the table as failed with an error kind and message
    pub fn set_error(&mut self, error: impl Into<String>, message: impl Into<String>) {
        self.error = error.into();
        self.error_message = message.into();
        self.status = Status::Error;
    }

    /// Error kind, empty if none
    pub fn error(&self) -> &str {
        &self.error
    }

    /// Error message, empty if none
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// Check if an analysis-level error replaces the data
    pub fn has_error(&self) -> bool {
        !self.error.is_empty() || !self.error_message.is_empty()
    }

    /// Display rows as columns and columns as rows
    pub fn set_transpose(&mut self, transpose: bool) {
        self.transpose_table = transpose;
    }

    /// Check if the table is displayed transposed
    pub fn is_transposed(&self) -> bool {
        self.transpose_table
    }

    /// Keep overtitles when displaying transposed
    pub fn set_transpose_with_overtitle(&mut self, keep: bool) {
        self.transpose_with_overtitle = keep;
    }

    /// Check if overtitles are kept when transposed
    pub fn transposes_with_overtitle(&self) -> bool {
        self.transpose_with_overtitle
    }

    /// Only display columns declared through `add_column_info`
    pub fn set_show_specified_columns_only(&mut self, only: bool) {
        self.show_specified_columns_only = only;
    }

    /// Check if only declared columns are displayed
    pub fn shows_specified_columns_only(&self) -> bool {
        self.show_specified_columns_only
    }

    /// Names declared through `add_column_info`
    pub fn specified_columns(&self) -> &BTreeSet<String> {
        &self.specified_columns
    }

    /// Footnotes in insertion order
    pub fn footnotes(&self) -> &[Footnote] {
        &self.footnotes
    }

    /// Cell combination requests in insertion order
    pub fn combinations(&self) -> &[ColRowCombination] {
        &self.combinations
    }

    /// Column axis
    pub fn column_axis(&self) -> &NamedAxis {
        &self.col_names
    }

    /// Row axis
    pub fn row_axis(&self) -> &NamedAxis {
        &self.row_names
    }

    /// Display metadata
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Raw column store
    pub fn store(&self) -> &ColumnStore {
        &self.data
    }

    /// Number of data columns
    pub fn column_count(&self) -> usize {
        self.data.len()
    }

    /// Number of rows, i.e. the length of the longest column
    pub fn row_count(&self) -> usize {
        self.data.max_len()
    }

    /// Number of addressable columns: declared or holding data
    pub(crate) fn addressable_columns(&self) -> usize {
        self.col_names.len().max(self.data.len())
    }

    /// Name of a column, or its default name
    pub fn col_name(&self, col: usize) -> String {
        self.col_names.get(col)
    }

    /// Name of a row, or its default name
    pub fn row_name(&self, row: usize) -> String {
        self.row_names.get(row)
    }

    /// Name a row
    pub fn set_row_name(&mut self, row: usize, name: impl Into<String>) {
        self.row_names.set(row, name);
    }

    /// Cells of a column
    pub fn column(&self, col: usize) -> Option<&[CellValue]> {
        self.data.column(col)
    }

    /// A single cell; null outside the stored range
    pub fn cell(&self, col: usize, row: usize) -> &CellValue {
        self.data.cell(col, row)
    }

    /// Format spec in effect for a column
    pub fn col_format(&self, col: usize) -> Option<&str> {
        self.metadata.format(&self.col_name(col), col)
    }

    /// Title shown for a column: its title, else its name
    pub fn col_title(&self, col: usize) -> String {
        let name = self.col_name(col);
        match self.metadata.title(&name, col) {
            Some(title) => title.to_string(),
            None => name,
        }
    }

    /// Title shown for a row: its title, else its name
    pub fn row_title(&self, row: usize) -> String {
        let name = self.row_name(row);
        match self.metadata.row_title(&name, row) {
            Some(title) => title.to_string(),
            None => name,
        }
    }

    /// Give the row called `name` a display title
    pub fn set_row_title(&mut self, name: impl Into<String>, title: impl Into<String>) {
        self.metadata.row_titles.set_name(name, title.into());
    }

    /// Overtitle of a column, empty if none
    pub fn col_overtitle(&self, col: usize) -> String {
        self.metadata
            .overtitle(&self.col_name(col), col)
            .unwrap_or_default()
            .to_string()
    }

    /// Type inferred from the cells of a column
    pub fn derive_column_type(&self, col: usize) -> ColumnType {
        match self.data.column(col) {
            Some(cells) => ColumnType::infer(cells),
            None => ColumnType::Null,
        }
    }

    /// Type of a column: declared if any, else inferred
    pub fn col_type(&self, col: usize) -> String {
        match self.metadata.declared_type(&self.col_name(col), col) {
            Some(declared) => declared.to_string(),
            None => self.derive_column_type(col).as_str().to_string(),
        }
    }

    /// A cell rendered with its column's format spec
    pub fn cell_formatted(&self, col: usize, row: usize) -> String {
        format_cell(self.cell(col, row), self.col_format(col))
    }

    /// Check if a column is shown: not hidden, and declared when only
    /// declared columns are shown
    pub fn is_column_visible(&self, col: usize) -> bool {
        let name = self.col_name(col);
        if name.starts_with(HIDDEN_COLUMN_MARKER) {
            return false;
        }
        !self.show_specified_columns_only
            || self.specified_columns.contains(self.col_names.raw(col))
    }

    /// Pad every column with nulls to the longest length; returns that length
    pub fn equalize_columns_lengths(&mut self) -> usize {
        self.data.equalize()
    }

    /// Default name the next declared column would get
    pub(crate) fn next_default_col_name(&self) -> String {
        AxisKind::Column.default_name(self.col_names.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TabularInput;

    #[test]
    fn test_new_table_is_empty() {
        let table = Table::new("Descriptives");
        assert_eq!(table.title(), "Descriptives");
        assert_eq!(table.column_count(), 0);
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.status(), Status::Complete);
        assert!(!table.has_error());
    }

    #[test]
    fn test_set_error_forces_status() {
        let mut table = Table::new("t");
        table.set_error("Computation failed", "singular matrix");
        assert_eq!(table.status(), Status::Error);
        assert!(table.has_error());
    }

    #[test]
    fn test_col_type_declared_overrides_inferred() {
        let mut table = Table::new("t");
        table
            .add_columns(TabularInput::columns([(
                "p",
                vec![CellValue::Real(0.01), CellValue::Int(1)],
            )]))
            .unwrap();
        assert_eq!(table.col_type(0), "number");

        table.metadata.types.set_position(0, "pvalue".to_string());
        assert_eq!(table.col_type(0), "pvalue");

        table.metadata.types.set_name("p", "integer".to_string());
        assert_eq!(table.col_type(0), "integer");
    }

    #[test]
    fn test_hidden_and_specified_visibility() {
        let mut table = Table::new("t");
        table.add_column_info(ColumnInfo::new("shown"));
        table.add_column_info(ColumnInfo::new(".internal"));
        table
            .add_columns(TabularInput::columns([("extra", vec![CellValue::Int(1)])]))
            .unwrap();

        assert!(table.is_column_visible(0));
        assert!(!table.is_column_visible(1));
        assert!(table.is_column_visible(2));

        table.set_show_specified_columns_only(true);
        assert!(table.is_column_visible(0));
        assert!(!table.is_column_visible(2));
    }

    #[test]
    fn test_titles_fall_back_to_names() {
        let mut table = Table::new("t");
        table.add_column_info(ColumnInfo::new("m").title("Mean"));
        table.add_column_info(ColumnInfo::new("sd"));
        assert_eq!(table.col_title(0), "Mean");
        assert_eq!(table.col_title(1), "sd");
        assert_eq!(table.col_title(5), "col5");
        assert_eq!(table.row_title(0), "row0");
    }
}
