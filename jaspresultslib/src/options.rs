//! Output options for presenting result elements.
//!
//! [`RenderOptions`] picks one of the [`OutputFormat`]s together with the
//! line prefix used by text output and the nested name written into
//! display documents.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::plot::Plot;
use crate::table::Table;
use crate::Result;

/// How a result element is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Monospaced text with box separators
    #[default]
    Text,
    /// HTML fragment
    Html,
    /// Pretty-printed display document
    Document,
    /// Pretty-printed full snapshot
    Snapshot,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Html => "html",
            OutputFormat::Document => "document",
            OutputFormat::Snapshot => "snapshot",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "html" => Ok(OutputFormat::Html),
            "document" | "doc" | "json" => Ok(OutputFormat::Document),
            "snapshot" | "state" => Ok(OutputFormat::Snapshot),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for rendering a table or plot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Output format
    pub format: OutputFormat,
    /// Prefix for every line of text output
    pub prefix: String,
    /// Nested name written into display documents
    pub name: String,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the output format
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Builder: set the text line prefix
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Builder: set the document name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Render a table in the chosen format.
    pub fn render_table(&self, table: &Table) -> Result<String> {
        Ok(match self.format {
            OutputFormat::Text => table.to_text(&self.prefix),
            OutputFormat::Html => table.to_html(),
            OutputFormat::Document => serde_json::to_string_pretty(&table.data_entry(&self.name))?,
            OutputFormat::Snapshot => serde_json::to_string_pretty(&table.to_snapshot())?,
        })
    }

    /// Render a plot in the chosen format.
    pub fn render_plot(&self, plot: &Plot) -> Result<String> {
        Ok(match self.format {
            OutputFormat::Text => plot.to_text(&self.prefix),
            OutputFormat::Html => plot.to_html(),
            OutputFormat::Document => serde_json::to_string_pretty(&plot.data_entry(&self.name))?,
            OutputFormat::Snapshot => serde_json::to_string_pretty(&plot.to_snapshot())?,
        })
    }
}
