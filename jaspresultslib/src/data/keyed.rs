//! Dual-keyed lookup lists.
//!
//! A `KeyedList` holds values addressable both by position and by name.
//! Both views are valid at the same time and are filled independently; a
//! lookup tries the name first and falls back to the position.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Values keyed by position and by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedList<T> {
    /// Position-keyed values
    #[serde(default)]
    list: Vec<T>,
    /// Name-keyed values
    #[serde(default)]
    dict: BTreeMap<String, T>,
}

impl<T> Default for KeyedList<T> {
    fn default() -> Self {
        Self {
            list: Vec::new(),
            dict: BTreeMap::new(),
        }
    }
}

impl<T> KeyedList<T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from position-keyed values only
    pub fn from_list(list: Vec<T>) -> Self {
        Self {
            list,
            dict: BTreeMap::new(),
        }
    }

    /// Number of position-keyed entries
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if neither view holds anything
    pub fn is_empty(&self) -> bool {
        self.list.is_empty() && self.dict.is_empty()
    }

    /// Value stored at a position
    pub fn by_position(&self, index: usize) -> Option<&T> {
        self.list.get(index)
    }

    /// Value stored under a name
    pub fn by_name(&self, name: &str) -> Option<&T> {
        self.dict.get(name)
    }

    /// Check if a name has a value
    pub fn contains_name(&self, name: &str) -> bool {
        self.dict.contains_key(name)
    }

    /// Name-keyed value if present, else the position-keyed one
    pub fn lookup(&self, name: &str, index: usize) -> Option<&T> {
        self.by_name(name).or_else(|| self.by_position(index))
    }

    /// Store a value under a name
    pub fn set_name(&mut self, name: impl Into<String>, value: T) {
        self.dict.insert(name.into(), value);
    }

    /// Position-keyed values in order
    pub fn as_list(&self) -> &[T] {
        &self.list
    }

    /// Consume into the position-keyed values
    pub fn into_list(self) -> Vec<T> {
        self.list
    }
}

impl<T: Default> KeyedList<T> {
    /// Store a value at a position, growing the list with defaults as needed
    pub fn set_position(&mut self, index: usize, value: T) {
        if self.list.len() <= index {
            self.list.resize_with(index + 1, T::default);
        }
        self.list[index] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_wins_over_position() {
        let mut titles = KeyedList::new();
        titles.set_position(0, "by position".to_string());
        titles.set_name("a", "by name".to_string());

        assert_eq!(titles.lookup("a", 0).map(String::as_str), Some("by name"));
        assert_eq!(
            titles.lookup("b", 0).map(String::as_str),
            Some("by position")
        );
        assert_eq!(titles.lookup("b", 1), None);
    }

    #[test]
    fn test_set_position_grows_with_defaults() {
        let mut combines: KeyedList<bool> = KeyedList::new();
        combines.set_position(2, true);
        assert_eq!(combines.as_list(), &[false, false, true]);
        assert_eq!(combines.len(), 3);
    }

    #[test]
    fn test_serialized_layout() {
        let mut formats = KeyedList::new();
        formats.set_position(0, "dp:2".to_string());
        formats.set_name("p", "p:0.05".to_string());

        let value = serde_json::to_value(&formats).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"list": ["dp:2"], "dict": {"p": "p:0.05"}})
        );

        let missing_dict: KeyedList<String> =
            serde_json::from_value(serde_json::json!({"list": ["x"]})).unwrap();
        assert_eq!(missing_dict.by_position(0).map(String::as_str), Some("x"));
    }
}
