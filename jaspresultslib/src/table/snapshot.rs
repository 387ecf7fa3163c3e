//! Full-fidelity table snapshots.
//!
//! A snapshot carries every field of a [`Table`] so that restoring it gives
//! an equal table. Fields missing from a snapshot take the defaults of
//! [`TableSnapshot::default`]; the field names are part of the cache format
//! and must not change.
//!
//! JSON numbers cannot hold NaN or infinities, so those cells are written as
//! null in `data` and listed again in `nonFiniteCells`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

use super::{Metadata, Table};
use crate::data::{
    AxisKind, CellValue, ColRowCombination, ColumnStore, Footnote, KeyedList, NamedAxis, Status,
};
use crate::error::ResultsError;
use crate::Result;

/// Text written for text fields absent from a snapshot.
pub const MISSING_TEXT: &str = "null";

/// Serialized form of a [`Table`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableSnapshot {
    #[serde(rename = "type")]
    pub element_type: String,
    pub title: String,
    pub status: Status,
    pub error: String,
    pub error_message: String,
    pub footnotes: Vec<Footnote>,
    pub transpose_table: bool,
    pub transpose_with_overtitle: bool,
    pub show_specified_columns_only: bool,
    pub col_names: KeyedList<String>,
    pub col_types: KeyedList<String>,
    pub row_names: KeyedList<String>,
    pub row_titles: KeyedList<String>,
    pub col_titles: KeyedList<String>,
    pub col_overtitles: KeyedList<String>,
    pub col_formats: KeyedList<String>,
    pub col_combines: KeyedList<bool>,
    /// Column-major cells
    pub data: Vec<Vec<CellValue>>,
    pub col_row_combinations: Vec<ColRowCombination>,
    pub specified_columns: BTreeSet<String>,
    pub non_finite_cells: Vec<NonFiniteCell>,
}

/// A real that has no JSON number form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NonFinite {
    #[serde(rename = "NaN")]
    NaN,
    #[serde(rename = "Inf")]
    Inf,
    #[serde(rename = "-Inf")]
    NegInf,
}

impl NonFinite {
    /// Classify a real, `None` when it is finite
    pub fn of(value: f64) -> Option<Self> {
        if value.is_nan() {
            Some(NonFinite::NaN)
        } else if value == f64::INFINITY {
            Some(NonFinite::Inf)
        } else if value == f64::NEG_INFINITY {
            Some(NonFinite::NegInf)
        } else {
            None
        }
    }

    pub fn value(self) -> f64 {
        match self {
            NonFinite::NaN => f64::NAN,
            NonFinite::Inf => f64::INFINITY,
            NonFinite::NegInf => f64::NEG_INFINITY,
        }
    }
}

/// Position and value of a non-finite real cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonFiniteCell {
    pub col: usize,
    pub row: usize,
    pub value: NonFinite,
}

fn non_finite_cells(columns: &[Vec<CellValue>]) -> Vec<NonFiniteCell> {
    columns
        .iter()
        .enumerate()
        .flat_map(|(col, cells)| {
            cells.iter().enumerate().filter_map(move |(row, cell)| match cell {
                CellValue::Real(r) => {
                    NonFinite::of(*r).map(|value| NonFiniteCell { col, row, value })
                }
                _ => None,
            })
        })
        .collect()
}

impl Default for TableSnapshot {
    fn default() -> Self {
        Self {
            element_type: "table".to_string(),
            title: MISSING_TEXT.to_string(),
            status: Status::Complete,
            error: String::new(),
            error_message: String::new(),
            footnotes: Vec::new(),
            transpose_table: false,
            transpose_with_overtitle: false,
            show_specified_columns_only: false,
            col_names: KeyedList::new(),
            col_types: KeyedList::new(),
            row_names: KeyedList::new(),
            row_titles: KeyedList::new(),
            col_titles: KeyedList::new(),
            col_overtitles: KeyedList::new(),
            col_formats: KeyedList::new(),
            col_combines: KeyedList::new(),
            data: Vec::new(),
            col_row_combinations: Vec::new(),
            specified_columns: BTreeSet::new(),
            non_finite_cells: Vec::new(),
        }
    }
}

impl Table {
    /// Capture every field of the table.
    pub fn to_snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            element_type: "table".to_string(),
            title: self.title.clone(),
            status: self.status,
            error: self.error.clone(),
            error_message: self.error_message.clone(),
            footnotes: self.footnotes.clone(),
            transpose_table: self.transpose_table,
            transpose_with_overtitle: self.transpose_with_overtitle,
            show_specified_columns_only: self.show_specified_columns_only,
            col_names: KeyedList::from_list(self.col_names.names().to_vec()),
            col_types: self.metadata.types.clone(),
            row_names: KeyedList::from_list(self.row_names.names().to_vec()),
            row_titles: self.metadata.row_titles.clone(),
            col_titles: self.metadata.titles.clone(),
            col_overtitles: self.metadata.overtitles.clone(),
            col_formats: self.metadata.formats.clone(),
            col_combines: self.metadata.combines.clone(),
            data: self.data.columns().to_vec(),
            col_row_combinations: self.combinations.clone(),
            specified_columns: self.specified_columns.clone(),
            non_finite_cells: non_finite_cells(self.data.columns()),
        }
    }

    /// Rebuild a table from a snapshot.
    pub fn from_snapshot(snapshot: TableSnapshot) -> Self {
        let mut data = snapshot.data;
        for cell in snapshot.non_finite_cells {
            if let Some(slot) = data.get_mut(cell.col).and_then(|cells| cells.get_mut(cell.row)) {
                *slot = CellValue::Real(cell.value.value());
            }
        }

        Table {
            title: snapshot.title,
            status: snapshot.status,
            error: snapshot.error,
            error_message: snapshot.error_message,
            footnotes: snapshot.footnotes,
            combinations: snapshot.col_row_combinations,
            transpose_table: snapshot.transpose_table,
            transpose_with_overtitle: snapshot.transpose_with_overtitle,
            show_specified_columns_only: snapshot.show_specified_columns_only,
            specified_columns: snapshot.specified_columns,
            col_names: NamedAxis::from_names(AxisKind::Column, snapshot.col_names.into_list()),
            row_names: NamedAxis::from_names(AxisKind::Row, snapshot.row_names.into_list()),
            metadata: Metadata {
                titles: snapshot.col_titles,
                types: snapshot.col_types,
                formats: snapshot.col_formats,
                overtitles: snapshot.col_overtitles,
                combines: snapshot.col_combines,
                row_titles: snapshot.row_titles,
            },
            data: ColumnStore::from_columns(data),
        }
    }

    /// Snapshot as a JSON value.
    pub fn to_json_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.to_snapshot())?)
    }

    /// Restore from a JSON snapshot value.
    pub fn from_json_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(ResultsError::InvalidSnapshot(
                "a table snapshot must be a JSON object".to_string(),
            ));
        }
        if let Some(kind) = value.get("type").and_then(Value::as_str) {
            if kind != "table" {
                return Err(ResultsError::InvalidSnapshot(format!(
                    "expected a table snapshot, found '{}'",
                    kind
                )));
            }
        }

        let snapshot: TableSnapshot = serde_json::from_value(value)?;
        Ok(Table::from_snapshot(snapshot))
    }
}
