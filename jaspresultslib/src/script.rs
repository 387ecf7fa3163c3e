//! Operation scripts: table mutations in textual form.
//!
//! A script is a JSON array of operations, each tagged by `"op"`:
//!
//! ```json
//! [
//!   {"op": "set_title", "title": "Descriptives"},
//!   {"op": "add_column_info", "name": "mean", "format": "dp:2"},
//!   {"op": "add_rows", "data": {"named": [["mean", 4.5678]]}}
//! ]
//! ```
//!
//! Data payloads use the externally tagged [`TabularInput`] encoding
//! (`empty`, `sequence`, `named`, `matrix`, `list`, `dataframe`).

use log::trace;
use serde::{Deserialize, Serialize};

use crate::data::{ColRowCombination, Status, TabularInput};
use crate::table::{ColumnInfo, Table};
use crate::Result;

/// One table mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TableOp {
    SetTitle {
        title: String,
    },
    SetData {
        data: TabularInput,
    },
    SetColumn {
        name: String,
        data: TabularInput,
    },
    AddColumns {
        data: TabularInput,
    },
    AddRows {
        data: TabularInput,
        #[serde(default)]
        row_names: Vec<String>,
    },
    AddColumnInfo(ColumnInfo),
    AddFootnote {
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        symbol: Option<String>,
        #[serde(default)]
        cols: Vec<String>,
        #[serde(default)]
        rows: Vec<String>,
    },
    AddCombination(ColRowCombination),
    SetRowTitle {
        row: String,
        title: String,
    },
    SetStatus {
        status: Status,
    },
    SetError {
        error: String,
        #[serde(default)]
        message: String,
    },
    Transpose {
        #[serde(default = "enabled")]
        enabled: bool,
        #[serde(default)]
        with_overtitle: bool,
    },
    ShowSpecifiedColumnsOnly {
        #[serde(default = "enabled")]
        enabled: bool,
    },
    Equalize,
}

fn enabled() -> bool {
    true
}

impl TableOp {
    /// Apply this operation to a table.
    pub fn apply(self, table: &mut Table) -> Result<()> {
        match self {
            TableOp::SetTitle { title } => table.set_title(title),
            TableOp::SetData { data } => table.set_data(data)?,
            TableOp::SetColumn { name, data } => table.set_column(&name, data)?,
            TableOp::AddColumns { data } => table.add_columns(data)?,
            TableOp::AddRows { data, row_names } => table.add_rows(data, &row_names)?,
            TableOp::AddColumnInfo(info) => table.add_column_info(info),
            TableOp::AddFootnote {
                message,
                symbol,
                cols,
                rows,
            } => table.add_footnote(message.as_deref(), symbol.as_deref(), &cols, &rows)?,
            TableOp::AddCombination(combination) => table.add_combination(combination),
            TableOp::SetRowTitle { row, title } => table.set_row_title(row, title),
            TableOp::SetStatus { status } => table.set_status(status),
            TableOp::SetError { error, message } => table.set_error(error, message),
            TableOp::Transpose {
                enabled,
                with_overtitle,
            } => {
                table.set_transpose(enabled);
                table.set_transpose_with_overtitle(with_overtitle);
            }
            TableOp::ShowSpecifiedColumnsOnly { enabled } => {
                table.set_show_specified_columns_only(enabled)
            }
            TableOp::Equalize => {
                table.equalize_columns_lengths();
            }
        }
        Ok(())
    }
}

/// Parse a JSON script into operations.
pub fn parse_script(json: &str) -> Result<Vec<TableOp>> {
    Ok(serde_json::from_str(json)?)
}

/// Apply operations in order; the first failure aborts with its error.
pub fn apply_script(table: &mut Table, ops: Vec<TableOp>) -> Result<()> {
    for (index, op) in ops.into_iter().enumerate() {
        trace!("applying script op {}: {:?}", index, op);
        op.apply(table)?;
    }
    Ok(())
}
