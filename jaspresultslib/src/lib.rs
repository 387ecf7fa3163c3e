//! # jaspresultslib
//!
//! Incrementally built results tables and plots for statistical analyses.
//!
//! ## Overview
//!
//! An analysis produces its output piece by piece: a table is declared with
//! its columns, rows arrive one at a time, footnotes are attached, and the
//! whole thing is rendered, exported or cached at any point in between.
//! This crate holds that state and presents it:
//!
//! - **Data**: cell values, named axes with default names, keyed metadata
//!   lists and a ragged column-major store
//! - **Table**: the mutation engine that reconciles incoming data (sequences,
//!   matrices, record lists, data frames) into the store by name or position
//! - **Output**: per-cell number formats, monospaced text and HTML rendering
//!   with overtitle spans
//! - **Serialization**: a one-way display document and a full-fidelity
//!   snapshot that restores an identical table
//! - **Results arena**: a tree of containers, tables and plots addressed by
//!   handles, with nested names and one-shot teardown
//! - **Scripts**: table mutations as JSON, for tooling and tests
//!
//! ## Example
//!
//! ```rust
//! use jaspresultslib::{CellValue, ColumnInfo, Table, TabularInput};
//!
//! let mut table = Table::new("Descriptives");
//! table.add_column_info(ColumnInfo::new("var").title(""));
//! table.add_column_info(ColumnInfo::new("mean").title("Mean").format("dp:2"));
//!
//! table
//!     .add_rows(
//!         TabularInput::named([("var", CellValue::from("x")), ("mean", CellValue::from(4.5678))]),
//!         &[],
//!     )
//!     .unwrap();
//! assert_eq!(table.cell_formatted(1, 0), "4.57");
//!
//! // A snapshot restores a table that renders identically
//! let snapshot = table.to_json_value().unwrap();
//! let restored = Table::from_json_value(snapshot).unwrap();
//! assert_eq!(restored.to_text(""), table.to_text(""));
//! ```

pub mod data;
pub mod error;
pub mod options;
pub mod output;
pub mod plot;
pub mod results;
pub mod script;
pub mod table;

pub use data::{
    AxisKind, CellValue, ColRowCombination, ColumnStore, ColumnType, Footnote, KeyedList, Matrix,
    NamedAxis, NamedColumn, Record, Status, Table2D, TabularInput,
};
pub use error::ResultsError;
pub use options::{OutputFormat, RenderOptions};
pub use output::{format_cell, FormatSpec};
pub use plot::{Plot, PlotDocument, PlotSnapshot};
pub use results::{Container, NodeHandle, ResultElement, ResultsArena};
pub use script::{apply_script, parse_script, TableOp};
pub use table::{ColumnInfo, Table, TableDocument, TableSnapshot};

/// Result type for jaspresultslib operations
pub type Result<T> = std::result::Result<T, ResultsError>;
