//! Named axes: positional names for columns or rows.

/// Which dimension an axis names; decides the default name of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    /// Column names, defaulting to `col{i}`
    Column,
    /// Row names, defaulting to `row{i}`
    Row,
}

impl AxisKind {
    /// Placeholder name for an unnamed position
    pub fn default_name(self, index: usize) -> String {
        match self {
            AxisKind::Column => format!("col{}", index),
            AxisKind::Row => format!("row{}", index),
        }
    }
}

/// Ordered list of optional names, one per position.
///
/// An empty string marks an unset position. Names are not required to be
/// unique; a lookup by name returns the last position carrying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedAxis {
    kind: AxisKind,
    names: Vec<String>,
}

impl NamedAxis {
    /// Create an empty axis of the given kind
    pub fn new(kind: AxisKind) -> Self {
        Self {
            kind,
            names: Vec::new(),
        }
    }

    /// Create an empty column axis
    pub fn columns() -> Self {
        Self::new(AxisKind::Column)
    }

    /// Create an empty row axis
    pub fn rows() -> Self {
        Self::new(AxisKind::Row)
    }

    /// Create an axis from stored names (empty strings are unset positions)
    pub fn from_names(kind: AxisKind, names: Vec<String>) -> Self {
        Self { kind, names }
    }

    /// Kind of this axis
    pub fn kind(&self) -> AxisKind {
        self.kind
    }

    /// Name at a position, or the default name if none was set
    pub fn get(&self, index: usize) -> String {
        match self.names.get(index) {
            Some(name) if !name.is_empty() => name.clone(),
            _ => self.kind.default_name(index),
        }
    }

    /// Name explicitly set at a position; empty if none
    pub fn raw(&self, index: usize) -> &str {
        self.names.get(index).map(String::as_str).unwrap_or("")
    }

    /// Check if a position carries an explicit name
    pub fn is_named(&self, index: usize) -> bool {
        !self.raw(index).is_empty()
    }

    /// Set the name of a position, growing the axis as needed
    pub fn set(&mut self, index: usize, name: impl Into<String>) {
        if self.names.len() <= index {
            self.names.resize(index + 1, String::new());
        }
        self.names[index] = name.into();
    }

    /// Append a name and return its position
    pub fn add(&mut self, name: impl Into<String>) -> usize {
        self.names.push(name.into());
        self.names.len() - 1
    }

    /// Last position explicitly named `name`
    pub fn find_index(&self, name: &str) -> Option<usize> {
        if name.is_empty() {
            return None;
        }
        self.names.iter().rposition(|n| n == name)
    }

    /// Number of positions
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the axis has no positions
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Stored names, with empty strings at unset positions
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        let cols = NamedAxis::columns();
        let rows = NamedAxis::rows();
        assert_eq!(cols.get(3), "col3");
        assert_eq!(rows.get(0), "row0");
    }

    #[test]
    fn test_set_grows_with_unset_positions() {
        let mut axis = NamedAxis::columns();
        axis.set(2, "mean");
        assert_eq!(axis.len(), 3);
        assert!(!axis.is_named(0));
        assert_eq!(axis.get(0), "col0");
        assert_eq!(axis.get(2), "mean");
        assert_eq!(axis.raw(1), "");
    }

    #[test]
    fn test_default_name_is_not_a_real_name() {
        let mut axis = NamedAxis::columns();
        axis.add("");
        axis.add("col0");
        assert_eq!(axis.get(0), "col0");
        assert!(!axis.is_named(0));
        assert!(axis.is_named(1));
        assert_eq!(axis.find_index("col0"), Some(1));
    }

    #[test]
    fn test_find_index_last_wins() {
        let mut axis = NamedAxis::rows();
        axis.add("a");
        axis.add("b");
        axis.add("a");
        assert_eq!(axis.find_index("a"), Some(2));
        assert_eq!(axis.find_index("c"), None);
        assert_eq!(axis.find_index(""), None);
    }
}
