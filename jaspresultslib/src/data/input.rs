//! Neutral tabular input shapes.
//!
//! Callers convert whatever they hold (vectors, matrices, lists, data
//! frames) into one of the [`TabularInput`] variants before handing it to a
//! table. The table switches on the variant; it never inspects foreign
//! runtime types.

use serde::{Deserialize, Serialize};

use super::cell::CellValue;
use crate::error::ResultsError;
use crate::Result;

/// Two-dimensional cells without record structure, stored column-major.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    /// Cells per column
    pub columns: Vec<Vec<CellValue>>,
    /// Optional column names
    #[serde(default)]
    pub col_names: Vec<String>,
    /// Optional row names
    #[serde(default)]
    pub row_names: Vec<String>,
}

impl Matrix {
    /// Create from column-major cells
    pub fn from_columns(columns: Vec<Vec<CellValue>>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    /// Create from row-major cells
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        let ncol = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut columns = vec![Vec::with_capacity(rows.len()); ncol];
        for row in rows {
            for (col, cell) in row.into_iter().enumerate() {
                columns[col].push(cell);
            }
        }
        Self::from_columns(columns)
    }

    /// Builder: set column names
    pub fn with_col_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.col_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set row names
    pub fn with_row_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.row_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Number of rows
    pub fn nrow(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Number of columns
    pub fn ncol(&self) -> usize {
        self.columns.len()
    }

    /// Cells of one row
    pub fn row(&self, row: usize) -> Vec<CellValue> {
        self.columns
            .iter()
            .map(|col| col.get(row).cloned().unwrap_or_default())
            .collect()
    }

    fn validate(&self, operation: &'static str) -> Result<()> {
        let nrow = self.nrow();
        if self.columns.iter().any(|col| col.len() != nrow) {
            return Err(ResultsError::unsupported(operation, "ragged matrix"));
        }
        Ok(())
    }
}

/// One entry of a keyed list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Name of the entry within the list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The entry's values
    #[serde(default)]
    pub values: Vec<CellValue>,
    /// Names of the individual values, if the entry is itself named
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
}

impl Record {
    /// Unnamed record
    pub fn new(values: Vec<CellValue>) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    /// Record carrying a name
    pub fn named(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            name: Some(name.into()),
            values,
            names: Vec::new(),
        }
    }

    /// Builder: name the individual values
    pub fn with_value_names<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the record holds no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Name of the entry, empty if unnamed
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Name of the value at a position, empty if unnamed
    pub fn value_name(&self, index: usize) -> &str {
        self.names.get(index).map(String::as_str).unwrap_or("")
    }
}

/// A named column of a data frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedColumn {
    /// Column name
    pub name: String,
    /// Column cells
    pub values: Vec<CellValue>,
}

/// Rows by named columns, all of equal length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table2D {
    /// Columns in order
    pub columns: Vec<NamedColumn>,
    /// Optional row names
    #[serde(default)]
    pub row_names: Vec<String>,
}

impl Table2D {
    /// Number of rows
    pub fn nrow(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Builder: set row names
    pub fn with_row_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.row_names = names.into_iter().map(Into::into).collect();
        self
    }

    fn validate(&self, operation: &'static str) -> Result<()> {
        let nrow = self.nrow();
        if self.columns.iter().any(|c| c.values.len() != nrow) {
            return Err(ResultsError::unsupported(
                operation,
                "dataframe with unequal column lengths",
            ));
        }
        Ok(())
    }
}

/// Every shape of data a table accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TabularInput {
    /// Nothing at all
    #[serde(rename = "empty")]
    Empty,
    /// Flat unnamed sequence
    #[serde(rename = "sequence")]
    Sequence(Vec<CellValue>),
    /// Flat sequence of named values
    #[serde(rename = "named")]
    NamedSequence(Vec<(String, CellValue)>),
    /// Two-dimensional cells, optionally with dimension names
    #[serde(rename = "matrix")]
    Matrix(Matrix),
    /// Keyed list of records
    #[serde(rename = "list")]
    RecordList(Vec<Record>),
    /// Data frame
    #[serde(rename = "dataframe")]
    Table2D(Table2D),
    /// A value the adapter could not classify, described by its kind
    #[serde(rename = "unsupported")]
    Unsupported(String),
}

impl TabularInput {
    /// Unnamed sequence from anything convertible into cells
    pub fn sequence<T: Into<CellValue>>(values: impl IntoIterator<Item = T>) -> Self {
        TabularInput::Sequence(values.into_iter().map(Into::into).collect())
    }

    /// Named sequence from `(name, value)` pairs
    pub fn named<S: Into<String>, T: Into<CellValue>>(
        pairs: impl IntoIterator<Item = (S, T)>,
    ) -> Self {
        TabularInput::NamedSequence(
            pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }

    /// Data frame from `(name, cells)` columns
    pub fn columns<S: Into<String>>(columns: impl IntoIterator<Item = (S, Vec<CellValue>)>) -> Self {
        TabularInput::Table2D(Table2D {
            columns: columns
                .into_iter()
                .map(|(name, values)| NamedColumn {
                    name: name.into(),
                    values,
                })
                .collect(),
            row_names: Vec::new(),
        })
    }

    /// Keyed list from records
    pub fn records(records: impl IntoIterator<Item = Record>) -> Self {
        TabularInput::RecordList(records.into_iter().collect())
    }

    /// Short description of the shape, used in error messages
    pub fn shape_name(&self) -> String {
        match self {
            TabularInput::Empty => "empty".to_string(),
            TabularInput::Sequence(_) => "sequence".to_string(),
            TabularInput::NamedSequence(_) => "named sequence".to_string(),
            TabularInput::Matrix(_) => "matrix".to_string(),
            TabularInput::RecordList(_) => "list".to_string(),
            TabularInput::Table2D(_) => "dataframe".to_string(),
            TabularInput::Unsupported(kind) => kind.clone(),
        }
    }

    /// Check structural invariants of the shape for the given operation
    pub(crate) fn validate(&self, operation: &'static str) -> Result<()> {
        match self {
            TabularInput::Matrix(m) => m.validate(operation),
            TabularInput::Table2D(df) => df.validate(operation),
            TabularInput::Unsupported(kind) => Err(ResultsError::unsupported(operation, kind)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_matrix_from_rows() {
        let m = Matrix::from_rows(vec![
            vec![CellValue::Int(1), CellValue::Int(2)],
            vec![CellValue::Int(3), CellValue::Int(4)],
            vec![CellValue::Int(5), CellValue::Int(6)],
        ]);
        assert_eq!(m.ncol(), 2);
        assert_eq!(m.nrow(), 3);
        assert_eq!(m.columns[1], vec![CellValue::Int(2), CellValue::Int(4), CellValue::Int(6)]);
        assert_eq!(m.row(2), vec![CellValue::Int(5), CellValue::Int(6)]);
    }

    #[test]
    fn test_ragged_matrix_is_rejected() {
        let input = TabularInput::Matrix(Matrix::from_columns(vec![
            vec![CellValue::Int(1)],
            vec![],
        ]));
        assert!(matches!(
            input.validate("set data"),
            Err(ResultsError::UnsupportedShape { .. })
        ));
    }

    #[test]
    fn test_unequal_dataframe_is_rejected() {
        let input = TabularInput::columns([
            ("a", vec![CellValue::Int(1), CellValue::Int(2)]),
            ("b", vec![CellValue::Int(1)]),
        ]);
        assert!(input.validate("add columns").is_err());
    }

    #[test]
    fn test_deserialize_tagged_shapes() {
        let seq: TabularInput = serde_json::from_value(json!({"sequence": [1, 2.5, "x"]})).unwrap();
        assert_eq!(
            seq,
            TabularInput::Sequence(vec![
                CellValue::Int(1),
                CellValue::Real(2.5),
                CellValue::from("x")
            ])
        );

        let named: TabularInput =
            serde_json::from_value(json!({"named": [["a", 1], ["b", null]]})).unwrap();
        assert_eq!(named, TabularInput::named([("a", Some(1)), ("b", None)]));

        let empty: TabularInput = serde_json::from_value(json!("empty")).unwrap();
        assert_eq!(empty, TabularInput::Empty);

        let list: TabularInput = serde_json::from_value(json!({
            "list": [{"name": "r1", "values": [1, 2], "names": ["a", "b"]}]
        }))
        .unwrap();
        let TabularInput::RecordList(records) = list else {
            panic!("expected a list");
        };
        assert_eq!(records[0].name_or_empty(), "r1");
        assert_eq!(records[0].value_name(1), "b");
        assert_eq!(records[0].value_name(2), "");
    }
}
