//! The display document of a table.
//!
//! This is the lightweight JSON a presentation layer consumes: a schema of
//! visible fields plus row-oriented data. It is one-way; see
//! [`TableSnapshot`](super::TableSnapshot) for the round-trip format.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Table;
use crate::data::Footnote;

/// One visible column in the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
    /// Column name (or its default)
    pub name: String,
    /// Column title; a declared empty title stays empty
    pub title: String,
    /// Declared or inferred type
    #[serde(rename = "type")]
    pub field_type: String,
    /// Overtitle, if any
    #[serde(rename = "overTitle", skip_serializing_if = "Option::is_none")]
    pub overtitle: Option<String>,
    /// Combine flag, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combine: Option<bool>,
    /// Format spec, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Field list of a table document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub fields: Vec<SchemaField>,
}

/// Error details of a failed table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Error kind
    #[serde(rename = "type")]
    pub kind: String,
    /// Error message
    #[serde(rename = "errorMessage")]
    pub message: String,
}

/// Display document of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDocument {
    /// Always `"table"`
    #[serde(rename = "type")]
    pub element_type: String,
    pub title: String,
    /// Unique nested name of the element
    pub name: String,
    pub footnotes: Vec<Footnote>,
    pub schema: Schema,
    /// One object per row, keyed by column name
    pub data: Vec<Map<String, Value>>,
    /// Whether the table is shown transposed
    #[serde(rename = "casesAcrossColumns")]
    pub cases_across_columns: bool,
    /// Whether overtitles survive transposition
    #[serde(rename = "overTitle")]
    pub over_title: bool,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorEntry>,
}

impl Table {
    /// Schema of the visible columns.
    pub fn schema(&self) -> Schema {
        let fields = (0..self.addressable_columns())
            .filter(|&col| self.is_column_visible(col))
            .map(|col| {
                let name = self.col_name(col);
                SchemaField {
                    title: self.schema_title(&name, col),
                    field_type: self.col_type(col),
                    overtitle: self.metadata.overtitle(&name, col).map(str::to_string),
                    combine: self.metadata.combine(&name, col),
                    format: self.metadata.format(&name, col).map(str::to_string),
                    name,
                }
            })
            .collect();
        Schema { fields }
    }

    /// Title written into the schema.
    ///
    /// A title declared under the column's name is kept even when empty.
    fn schema_title(&self, name: &str, col: usize) -> String {
        let titles = &self.metadata.titles;
        match titles.by_name(name) {
            Some(title) => title.clone(),
            _ => titles
                .by_position(col)
                .filter(|title| !title.is_empty())
                .cloned()
                .unwrap_or_else(|| name.to_string()),
        }
    }

    /// Row objects up to the first row where every column has run out.
    ///
    /// Every data column contributes a key to every row, including hidden
    /// ones; cells past the end of a short column are null.
    pub fn rows_json(&self) -> Vec<Map<String, Value>> {
        (0..self.row_count())
            .map(|row| {
                (0..self.data.len())
                    .map(|col| (self.col_name(col), self.cell(col, row).to_json()))
                    .collect()
            })
            .collect()
    }

    /// Display document of this table under its unique nested name.
    pub fn data_entry(&self, nested_name: &str) -> TableDocument {
        let error = self.has_error().then(|| ErrorEntry {
            kind: self.error.clone(),
            message: self.error_message.clone(),
        });
        let status = if error.is_some() {
            "error".to_string()
        } else {
            self.status.as_str().to_string()
        };

        TableDocument {
            element_type: "table".to_string(),
            title: self.title.clone(),
            name: nested_name.to_string(),
            footnotes: self.footnotes.clone(),
            schema: self.schema(),
            data: self.rows_json(),
            cases_across_columns: self.transpose_table,
            over_title: self.transpose_with_overtitle,
            status,
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CellValue, Status, TabularInput};
    use crate::table::ColumnInfo;
    use serde_json::json;

    #[test]
    fn test_schema_skips_hidden_columns() {
        let mut table = Table::new("t");
        table.add_column_info(ColumnInfo::new("est").title("Estimate").format("dp:2"));
        table.add_column_info(ColumnInfo::new(".se").col_type("number"));
        table
            .add_columns(TabularInput::columns([("extra", vec![CellValue::from("x")])]))
            .unwrap();

        let fields = table.schema().fields;
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["est", "extra"]);
        assert_eq!(fields[0].title, "Estimate");
        assert_eq!(fields[0].format.as_deref(), Some("dp:2"));
        assert_eq!(fields[0].field_type, "null");
        assert_eq!(fields[1].field_type, "string");

        table.set_show_specified_columns_only(true);
        assert_eq!(table.schema().fields.len(), 1);
    }

    #[test]
    fn test_schema_keeps_declared_empty_title() {
        let mut table = Table::new("t");
        table.add_column_info(ColumnInfo::new("var").title(""));
        table.add_column_info(ColumnInfo::new("mean"));

        let fields = table.schema().fields;
        assert_eq!(fields[0].title, "");
        assert_eq!(fields[1].title, "mean");
        assert_eq!(
            serde_json::to_value(&table.schema()).unwrap()["fields"][0],
            json!({"name": "var", "title": "", "type": "null"})
        );
        // Rendering still falls back to the name
        assert_eq!(table.col_title(0), "var");
    }

    #[test]
    fn test_rows_stop_when_every_column_is_exhausted() {
        let mut table = Table::new("t");
        table
            .add_columns(TabularInput::columns([(
                "a",
                vec![CellValue::Int(1), CellValue::Int(2), CellValue::Int(3)],
            )]))
            .unwrap();
        table
            .add_columns(TabularInput::columns([("b", vec![CellValue::Int(4)])]))
            .unwrap();

        let rows = table.rows_json();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2]["a"], json!(3));
        assert_eq!(rows[2]["b"], Value::Null);

        table.equalize_columns_lengths();
        assert_eq!(table.rows_json(), rows);
    }

    #[test]
    fn test_rows_ignore_trailing_padding_of_nothing() {
        let mut table = Table::new("t");
        table.add_column_info(ColumnInfo::new("a"));
        assert!(table.rows_json().is_empty());
        table.equalize_columns_lengths();
        assert!(table.rows_json().is_empty());
    }

    #[test]
    fn test_error_forces_status() {
        let mut table = Table::new("Results");
        table.set_status(Status::Running);
        let doc = serde_json::to_value(table.data_entry("analysis_results")).unwrap();
        assert_eq!(doc["status"], json!("running"));
        assert_eq!(doc["name"], json!("analysis_results"));
        assert_eq!(doc["type"], json!("table"));
        assert!(doc.get("error").is_none());

        table.error = "Bad input".to_string();
        let doc = serde_json::to_value(table.data_entry("r")).unwrap();
        assert_eq!(doc["status"], json!("error"));
        assert_eq!(
            doc["error"],
            json!({"type": "Bad input", "errorMessage": ""})
        );
        assert_eq!(doc["casesAcrossColumns"], json!(false));
        assert_eq!(doc["schema"], json!({"fields": []}));
    }
}
