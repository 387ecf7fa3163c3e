//! Status, footnotes and cell combinations shared by result elements.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Progress state of a result element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Not started yet
    Waiting,
    /// Being computed
    Running,
    /// Finished
    #[default]
    Complete,
    /// Failed
    Error,
}

impl Status {
    /// Name used in documents and snapshots
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Waiting => "waiting",
            Status::Running => "running",
            Status::Complete => "complete",
            Status::Error => "error",
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "waiting" => Ok(Status::Waiting),
            "running" => Ok(Status::Running),
            "complete" | "completed" => Ok(Status::Complete),
            "error" => Ok(Status::Error),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A footnote attached to a table or plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footnote {
    /// Footnote text
    #[serde(default)]
    pub text: String,
    /// Marker shown next to targeted cells, empty for none
    #[serde(default)]
    pub symbol: String,
    /// Targeted columns; `None` targets the table as a whole
    #[serde(default)]
    pub cols: Option<Vec<String>>,
    /// Targeted rows
    #[serde(default)]
    pub rows: Option<Vec<String>>,
}

impl Footnote {
    /// Footnote without a symbol or targets
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            symbol: String::new(),
            cols: None,
            rows: None,
        }
    }

    /// Builder: set the symbol
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Builder: target columns (an empty list clears the target)
    pub fn cols(mut self, cols: &[String]) -> Self {
        self.cols = (!cols.is_empty()).then(|| cols.to_vec());
        self
    }

    /// Builder: target rows (an empty list clears the target)
    pub fn rows(mut self, rows: &[String]) -> Self {
        self.rows = (!rows.is_empty()).then(|| rows.to_vec());
        self
    }
}

/// A request to visually merge cells across columns or rows.
///
/// Kept with the table and persisted, but not applied when rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColRowCombination {
    /// Identifier of the combination
    pub name: String,
    /// Title shown over the combined cells
    pub title: String,
    /// Whether the combined cell replaces the original contents
    pub overwrite: bool,
    /// Whether the separator between combined cells is dropped
    pub remove_separator: bool,
    /// Columns to combine
    pub col_names: Vec<String>,
    /// Rows to combine
    pub row_names: Vec<String>,
    /// Column overtitles to combine
    pub col_overtitles: Vec<String>,
    /// Row overtitles to combine
    pub row_overtitles: Vec<String>,
}

impl ColRowCombination {
    /// Check if this combines columns rather than rows
    pub fn combines_columns(&self) -> bool {
        !self.col_names.is_empty() || !self.col_overtitles.is_empty()
    }

    /// Check if the combination targets anything at all
    pub fn is_empty(&self) -> bool {
        self.col_names.is_empty()
            && self.row_names.is_empty()
            && self.col_overtitles.is_empty()
            && self.row_overtitles.is_empty()
    }
}

impl std::fmt::Display for ColRowCombination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (kind, targets) = if self.combines_columns() {
            ("col", &self.col_names)
        } else {
            ("row", &self.row_names)
        };

        write!(
            f,
            "{{ {}-combination with title({}), name({}) and {}s: [{}], does {}overwrite and does {}remove separator. }}",
            kind,
            self.title,
            self.name,
            kind,
            targets.join(", "),
            if self.overwrite { "" } else { "not " },
            if self.remove_separator { "" } else { "not " },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_from_str() {
        assert_eq!(Status::from_str("running").unwrap(), Status::Running);
        assert_eq!(Status::from_str("Complete").unwrap(), Status::Complete);
        assert!(Status::from_str("finished-ish").is_err());
    }

    #[test]
    fn test_footnote_layout() {
        let note = Footnote::new("Levene's test is significant")
            .symbol("*")
            .cols(&["F".to_string()])
            .rows(&[]);
        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(
            value,
            json!({"text": "Levene's test is significant", "symbol": "*", "cols": ["F"], "rows": null})
        );
    }

    #[test]
    fn test_footnote_without_text_restores() {
        let note: Footnote = serde_json::from_value(json!({"symbol": "a"})).unwrap();
        assert_eq!(note.text, "");
        assert_eq!(note.symbol, "a");
        assert_eq!(note.cols, None);
    }

    #[test]
    fn test_combination_description() {
        let combo = ColRowCombination {
            name: "g".to_string(),
            title: "Group".to_string(),
            col_names: vec!["a".to_string(), "b".to_string()],
            ..ColRowCombination::default()
        };
        let text = combo.to_string();
        assert!(text.starts_with("{ col-combination with title(Group), name(g) and cols: [a, b]"));
        assert!(text.contains("does not overwrite"));
        assert!(!combo.is_empty());
        assert!(ColRowCombination::default().is_empty());
    }
}
