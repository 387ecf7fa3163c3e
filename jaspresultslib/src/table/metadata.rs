//! Per-column (and per-row) display metadata.

use crate::data::KeyedList;

/// Column titles, declared types, formats, overtitles, combine flags and
/// row titles, each keyed by name and by position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    /// Column titles shown instead of column names
    pub titles: KeyedList<String>,
    /// Declared column types, overriding inference
    pub types: KeyedList<String>,
    /// `;`-separated format specs
    pub formats: KeyedList<String>,
    /// Labels spanning runs of adjacent columns
    pub overtitles: KeyedList<String>,
    /// Whether equal adjacent cells may be merged
    pub combines: KeyedList<bool>,
    /// Row titles shown instead of row names
    pub row_titles: KeyedList<String>,
}

/// Text lookup where empty strings count as unset.
fn non_empty<'a>(list: &'a KeyedList<String>, name: &str, index: usize) -> Option<&'a str> {
    list.by_name(name)
        .filter(|s| !s.is_empty())
        .or_else(|| list.by_position(index).filter(|s| !s.is_empty()))
        .map(String::as_str)
}

impl Metadata {
    /// Title of a column
    pub fn title(&self, name: &str, index: usize) -> Option<&str> {
        non_empty(&self.titles, name, index)
    }

    /// Declared type of a column
    pub fn declared_type(&self, name: &str, index: usize) -> Option<&str> {
        non_empty(&self.types, name, index)
    }

    /// Format spec of a column
    pub fn format(&self, name: &str, index: usize) -> Option<&str> {
        non_empty(&self.formats, name, index)
    }

    /// Overtitle of a column
    pub fn overtitle(&self, name: &str, index: usize) -> Option<&str> {
        non_empty(&self.overtitles, name, index)
    }

    /// Combine flag of a column
    pub fn combine(&self, name: &str, index: usize) -> Option<bool> {
        self.combines.lookup(name, index).copied()
    }

    /// Title of a row
    pub fn row_title(&self, name: &str, index: usize) -> Option<&str> {
        non_empty(&self.row_titles, name, index)
    }
}
