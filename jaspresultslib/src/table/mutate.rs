//! Mutation engine: reconciling incoming data into the column store.
//!
//! Two resolution strategies decide where incoming cells go:
//!
//! - **Column adding** reuses the column already carrying the incoming name,
//!   else appends after every column that is named or holds data, so unnamed
//!   data-only columns are never overwritten by later named appends.
//! - **Row adding** reuses a column by name, else picks the Nth unnamed
//!   column, where N counts the unnamed values already placed in the current
//!   row. Without an Nth unnamed column the value opens a new column.
//!
//! Every operation validates its input before touching the table, so a
//! failed call leaves the previous state intact.

use log::{debug, trace};

use super::{ColumnInfo, Table};
use crate::data::{CellValue, ColRowCombination, Footnote, Record, TabularInput};
use crate::error::ResultsError;
use crate::Result;

impl Table {
    /// Replace the entire column store with `input`.
    ///
    /// Names carried by the input are written to the axes; positions the
    /// input leaves unnamed keep whatever name they had.
    pub fn set_data(&mut self, input: TabularInput) -> Result<()> {
        input.validate("set data")?;
        self.data.clear();

        match input {
            TabularInput::Empty => {}
            TabularInput::Sequence(values) => {
                self.data.push_column(values);
            }
            TabularInput::NamedSequence(pairs) => {
                let (names, values): (Vec<String>, Vec<CellValue>) = pairs.into_iter().unzip();
                self.apply_row_names(0, &names);
                self.data.push_column(values);
            }
            TabularInput::Matrix(matrix) => {
                self.apply_col_names(&matrix.col_names);
                self.apply_row_names(0, &matrix.row_names);
                for column in matrix.columns {
                    self.data.push_column(column);
                }
            }
            TabularInput::RecordList(records) => {
                let names: Vec<String> = records
                    .iter()
                    .map(|r| r.name_or_empty().to_string())
                    .collect();
                self.apply_col_names(&names);
                if let Some(first) = records.iter().find(|r| !r.names.is_empty()) {
                    let row_names = first.names.clone();
                    self.apply_row_names(0, &row_names);
                }
                for record in records {
                    self.data.push_column(record.values);
                }
            }
            TabularInput::Table2D(frame) => {
                let names: Vec<String> = frame.columns.iter().map(|c| c.name.clone()).collect();
                self.apply_col_names(&names);
                self.apply_row_names(0, &frame.row_names);
                for column in frame.columns {
                    self.data.push_column(column.values);
                }
            }
            TabularInput::Unsupported(kind) => {
                return Err(ResultsError::unsupported("set data", kind))
            }
        }

        trace!("set data: {} columns", self.data.len());
        Ok(())
    }

    /// Replace the contents of the column called `name`, creating it if needed.
    ///
    /// A list of records is unwrapped to the first value of every record.
    pub fn set_column(&mut self, name: &str, input: TabularInput) -> Result<()> {
        let cells = match input {
            TabularInput::Empty => Vec::new(),
            TabularInput::Sequence(values) => values,
            TabularInput::NamedSequence(pairs) => {
                let (names, values): (Vec<String>, Vec<CellValue>) = pairs.into_iter().unzip();
                self.apply_row_names(0, &names);
                values
            }
            TabularInput::RecordList(records) => {
                let names: Vec<String> = records
                    .iter()
                    .map(|r| r.name_or_empty().to_string())
                    .collect();
                self.apply_row_names(0, &names);
                records.into_iter().map(first_value).collect()
            }
            other => return Err(ResultsError::unsupported("set column", other.shape_name())),
        };

        let index = self.column_index_for_column_adding(name);
        trace!("set column '{}' at {}", name, index);
        self.data.set_column(index, cells);
        if !name.is_empty() {
            self.col_names.set(index, name);
        }
        Ok(())
    }

    /// Add the columns of `input`, matching them by name.
    pub fn add_columns(&mut self, input: TabularInput) -> Result<()> {
        input.validate("add columns")?;

        match input {
            TabularInput::Empty => {}
            TabularInput::Sequence(values) => self.add_or_set_column(values, ""),
            TabularInput::NamedSequence(pairs) => {
                let (names, values): (Vec<String>, Vec<CellValue>) = pairs.into_iter().unzip();
                self.apply_row_names(0, &names);
                self.add_or_set_column(values, "");
            }
            TabularInput::Matrix(matrix) => {
                self.apply_row_names(0, &matrix.row_names);
                for (col, column) in matrix.columns.into_iter().enumerate() {
                    let name = matrix.col_names.get(col).map(String::as_str).unwrap_or("");
                    self.add_or_set_column(column, name);
                }
            }
            TabularInput::RecordList(records) => self.add_columns_from_records(records),
            TabularInput::Table2D(frame) => {
                self.apply_row_names(0, &frame.row_names);
                for column in frame.columns {
                    self.add_or_set_column(column.values, &column.name);
                }
            }
            TabularInput::Unsupported(kind) => {
                return Err(ResultsError::unsupported("add columns", kind))
            }
        }
        Ok(())
    }

    /// Append the rows of `input` below the existing data.
    ///
    /// `row_names` names the appended rows in order; when shorter than the
    /// input, the names carried by the input itself are used.
    pub fn add_rows(&mut self, input: TabularInput, row_names: &[String]) -> Result<()> {
        input.validate("add rows")?;

        match input {
            TabularInput::Empty => {}
            TabularInput::Sequence(values) => {
                let row = values.into_iter().map(|v| (String::new(), v)).collect();
                self.add_row(row, row_names.first().map(String::as_str));
            }
            TabularInput::NamedSequence(pairs) => {
                self.add_row(pairs, row_names.first().map(String::as_str));
            }
            TabularInput::Matrix(matrix) => {
                for row in 0..matrix.nrow() {
                    let cells = matrix
                        .row(row)
                        .into_iter()
                        .enumerate()
                        .map(|(col, v)| (matrix.col_names.get(col).cloned().unwrap_or_default(), v))
                        .collect();
                    let name = row_names.get(row).or_else(|| matrix.row_names.get(row));
                    self.add_row(cells, name.map(String::as_str));
                }
            }
            TabularInput::RecordList(records) => {
                for (row, record) in records.into_iter().enumerate() {
                    let name = row_names
                        .get(row)
                        .cloned()
                        .or_else(|| record.name.clone());
                    let cells = record
                        .values
                        .iter()
                        .enumerate()
                        .map(|(i, v)| (record.value_name(i).to_string(), v.clone()))
                        .collect();
                    self.add_row(cells, name.as_deref());
                }
            }
            TabularInput::Table2D(frame) => {
                let base = self.equalize_columns_lengths();
                let nrow = frame.nrow();
                let mut unnamed_seen = 0;
                for column in frame.columns {
                    unnamed_seen =
                        self.push_to_row_column(column.values, &column.name, base, unnamed_seen);
                }
                for row in 0..nrow {
                    if let Some(name) = row_names.get(row).or_else(|| frame.row_names.get(row)) {
                        if !name.is_empty() {
                            self.row_names.set(base + row, name.clone());
                        }
                    }
                }
            }
            TabularInput::Unsupported(kind) => {
                return Err(ResultsError::unsupported("add rows", kind))
            }
        }
        Ok(())
    }

    /// Declare a column and record its metadata.
    ///
    /// The column is appended to the column axis even if a column of that
    /// name exists, and its name is marked as specified.
    pub fn add_column_info(&mut self, info: ColumnInfo) {
        let name = info
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.next_default_col_name());

        self.specified_columns.insert(name.clone());
        self.col_names.add(name.clone());

        if let Some(title) = info.title {
            self.metadata.titles.set_name(name.clone(), title);
        }
        if let Some(col_type) = info.col_type {
            self.metadata.types.set_name(name.clone(), col_type);
        }
        if let Some(format) = info.format {
            self.metadata.formats.set_name(name.clone(), format);
        }
        if let Some(combine) = info.combine {
            self.metadata.combines.set_name(name.clone(), combine);
        }
        if let Some(overtitle) = info.overtitle {
            self.metadata.overtitles.set_name(name, overtitle);
        }
    }

    /// Attach a footnote; fails if there is no message.
    pub fn add_footnote(
        &mut self,
        message: Option<&str>,
        symbol: Option<&str>,
        cols: &[String],
        rows: &[String],
    ) -> Result<()> {
        let message = message.ok_or(ResultsError::MissingField("message"))?;
        let note = Footnote::new(message)
            .symbol(symbol.unwrap_or(""))
            .cols(cols)
            .rows(rows);
        self.footnotes.push(note);
        Ok(())
    }

    /// Record a cell combination request; one that names nothing is dropped.
    pub fn add_combination(&mut self, combination: ColRowCombination) {
        if combination.is_empty() {
            trace!("ignoring combination '{}' without targets", combination.name);
            return;
        }
        self.combinations.push(combination);
    }

    /// Column that column-wise adding of `name` writes to.
    pub(crate) fn column_index_for_column_adding(&self, name: &str) -> usize {
        if let Some(index) = self.col_names.find_index(name) {
            return index;
        }

        let after_named = (0..self.col_names.len())
            .rev()
            .find(|&i| self.col_names.is_named(i))
            .map_or(0, |i| i + 1);
        let after_filled = (0..self.data.len())
            .rev()
            .find(|&i| self.data.is_occupied(i))
            .map_or(0, |i| i + 1);

        after_named.max(after_filled)
    }

    /// Column that row-wise adding of `name` writes to, given how many
    /// unnamed values the current row already placed.
    pub(crate) fn column_index_for_row_adding(&self, name: &str, unnamed_seen: usize) -> usize {
        if let Some(index) = self.col_names.find_index(name) {
            return index;
        }

        let width = self.addressable_columns();
        (0..width)
            .filter(|&i| !self.col_names.is_named(i))
            .nth(unnamed_seen)
            .unwrap_or(width)
    }

    fn add_or_set_column(&mut self, cells: Vec<CellValue>, name: &str) {
        if name.is_empty() {
            let index = self.data.push_column(cells);
            trace!("appended unnamed column at {}", index);
            return;
        }

        let index = self.column_index_for_column_adding(name);
        trace!("column '{}' resolved to {}", name, index);
        self.data.set_column(index, cells);
        self.col_names.set(index, name);
    }

    /// Place one row; returns its index.
    fn add_row(&mut self, cells: Vec<(String, CellValue)>, row_name: Option<&str>) -> usize {
        let base = self.equalize_columns_lengths();
        let mut unnamed_seen = 0;
        for (name, value) in cells {
            unnamed_seen = self.push_to_row_column(vec![value], &name, base, unnamed_seen);
        }
        if let Some(name) = row_name.filter(|n| !n.is_empty()) {
            self.row_names.set(base, name);
        }
        base
    }

    /// Append `cells` to the column resolved for `name`, padding it to
    /// `base` first. Returns the updated unnamed counter.
    fn push_to_row_column(
        &mut self,
        cells: Vec<CellValue>,
        name: &str,
        base: usize,
        unnamed_seen: usize,
    ) -> usize {
        let index = self.column_index_for_row_adding(name, unnamed_seen);
        let unnamed_seen = if index >= self.col_names.len() || !self.col_names.is_named(index) {
            unnamed_seen + 1
        } else {
            unnamed_seen
        };

        self.data.pad_column(index, base);
        self.data.extend_column(index, cells);
        if !name.is_empty() {
            self.col_names.set(index, name);
        }
        unnamed_seen
    }

    fn add_columns_from_records(&mut self, records: Vec<Record>) {
        let longest = records.iter().map(Record::len).max().unwrap_or(0);

        if longest <= 1 && records.len() > 1 {
            trace!(
                "reading {} single-value records as one row across named columns",
                records.len()
            );
            let row = records
                .into_iter()
                .map(|r| (r.name_or_empty().to_string(), first_value(r)))
                .collect();
            self.add_row(row, None);
            return;
        }

        if let Some(first) = records.iter().find(|r| !r.names.is_empty()) {
            let row_names = first.names.clone();
            self.apply_row_names(0, &row_names);
        }
        for record in records {
            let name = record.name_or_empty().to_string();
            self.add_or_set_column(record.values, &name);
        }
    }

    /// Write the non-empty names to the column axis by position.
    fn apply_col_names(&mut self, names: &[String]) {
        for (index, name) in names.iter().enumerate() {
            if !name.is_empty() {
                self.col_names.set(index, name.clone());
            }
        }
    }

    /// Write the non-empty names to the row axis starting at `start`.
    fn apply_row_names(&mut self, start: usize, names: &[String]) {
        for (offset, name) in names.iter().enumerate() {
            if !name.is_empty() {
                self.row_names.set(start + offset, name.clone());
            }
        }
    }
}

/// The sole value of a single-value record; null when empty.
fn first_value(record: Record) -> CellValue {
    if record.len() > 1 {
        debug!(
            "record '{}' holds {} values, keeping only the first",
            record.name_or_empty(),
            record.len()
        );
    }
    record.values.into_iter().next().unwrap_or_default()
}
