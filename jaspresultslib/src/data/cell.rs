//! Cell values and column type inference

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single scalar stored in a table column.
///
/// Cells map one-to-one onto JSON scalars. Anything nested (arrays, objects)
/// is kept verbatim as `Composite` so that it survives a snapshot round trip,
/// but it is not something the table knows how to display.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    /// Missing value
    #[default]
    Null,
    /// Logical value
    Bool(bool),
    /// Whole number
    Int(i64),
    /// Floating point number
    Real(f64),
    /// Text
    Str(String),
    /// Nested JSON, unsupported as a displayable cell
    Composite(Value),
}

impl CellValue {
    /// Check if this cell holds no value
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Numeric view of the cell, for integers and reals only
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(v) => Some(*v as f64),
            CellValue::Real(v) => Some(*v),
            _ => None,
        }
    }

    /// Convert into the JSON value used by documents and snapshots
    pub fn to_json(&self) -> Value {
        match self {
            CellValue::Null => Value::Null,
            CellValue::Bool(b) => Value::Bool(*b),
            CellValue::Int(i) => Value::from(*i),
            CellValue::Real(r) => serde_json::Number::from_f64(*r)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            CellValue::Str(s) => Value::String(s.clone()),
            CellValue::Composite(v) => v.clone(),
        }
    }

    /// The column type this single cell would give a column
    fn cell_type(&self) -> Option<ColumnType> {
        match self {
            CellValue::Null => None,
            CellValue::Bool(_) => Some(ColumnType::Logical),
            CellValue::Int(_) => Some(ColumnType::Integer),
            CellValue::Real(_) => Some(ColumnType::Number),
            CellValue::Str(_) => Some(ColumnType::String),
            CellValue::Composite(_) => Some(ColumnType::Composite),
        }
    }
}

impl From<Value> for CellValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CellValue::Int(i)
                } else {
                    // u64 beyond i64::MAX and every float
                    CellValue::Real(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => CellValue::Str(s),
            nested => CellValue::Composite(nested),
        }
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Int(value as i64)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Real(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Str(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Str(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Null => serializer.serialize_unit(),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Int(i) => serializer.serialize_i64(*i),
            CellValue::Real(r) => serializer.serialize_f64(*r),
            CellValue::Str(s) => serializer.serialize_str(s),
            CellValue::Composite(v) => v.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(CellValue::from)
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Null | CellValue::Composite(_) => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Real(r) => write!(f, "{}", r),
            CellValue::Str(s) => f.write_str(s),
        }
    }
}

/// The type of a column, either declared or inferred from its cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// No non-null cells
    Null,
    /// Text cells only
    String,
    /// Logical cells only
    Logical,
    /// Whole numbers only
    Integer,
    /// Real numbers, possibly mixed with whole numbers
    Number,
    /// Cells of clashing types
    Various,
    /// At least one nested cell
    Composite,
}

impl ColumnType {
    /// Name used in schemas
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Null => "null",
            ColumnType::String => "string",
            ColumnType::Logical => "logical",
            ColumnType::Integer => "integer",
            ColumnType::Number => "number",
            ColumnType::Various => "various",
            ColumnType::Composite => "composite",
        }
    }

    /// Infer the least general type that covers every non-null cell.
    ///
    /// Integers widen to numbers and any other clash gives `Various`. A nested
    /// cell makes the column `Composite` as soon as it is reached.
    pub fn infer<'a, I>(cells: I) -> ColumnType
    where
        I: IntoIterator<Item = &'a CellValue>,
    {
        let mut working = ColumnType::Null;

        for cell in cells {
            let Some(found) = cell.cell_type() else {
                continue;
            };

            working = match (working, found) {
                (_, ColumnType::Composite) => return ColumnType::Composite,
                (ColumnType::Null, t) => t,
                (ColumnType::Integer, ColumnType::Number) => ColumnType::Number,
                (ColumnType::Number, ColumnType::Integer) => ColumnType::Number,
                (w, t) if w == t => w,
                _ => return ColumnType::Various,
            };
        }

        working
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cells(values: Value) -> Vec<CellValue> {
        match values {
            Value::Array(items) => items.into_iter().map(CellValue::from).collect(),
            other => vec![CellValue::from(other)],
        }
    }

    #[test]
    fn test_infer_integer() {
        assert_eq!(ColumnType::infer(&cells(json!([1, 2, 3]))), ColumnType::Integer);
    }

    #[test]
    fn test_infer_widens_to_number() {
        assert_eq!(ColumnType::infer(&cells(json!([1, 2.5]))), ColumnType::Number);
        assert_eq!(ColumnType::infer(&cells(json!([2.5, 1]))), ColumnType::Number);
    }

    #[test]
    fn test_infer_various() {
        assert_eq!(ColumnType::infer(&cells(json!([1, "a"]))), ColumnType::Various);
        assert_eq!(ColumnType::infer(&cells(json!([true, 1]))), ColumnType::Various);
        assert_eq!(ColumnType::infer(&cells(json!([2.5, "x"]))), ColumnType::Various);
    }

    #[test]
    fn test_infer_null_and_empty() {
        assert_eq!(ColumnType::infer(&Vec::<CellValue>::new()), ColumnType::Null);
        assert_eq!(ColumnType::infer(&cells(json!([null, null]))), ColumnType::Null);
    }

    #[test]
    fn test_infer_logical_ignores_nulls() {
        assert_eq!(
            ColumnType::infer(&cells(json!([true, null, false]))),
            ColumnType::Logical
        );
    }

    #[test]
    fn test_infer_composite_wins() {
        assert_eq!(
            ColumnType::infer(&cells(json!([1, "a", [1, 2]]))),
            ColumnType::Various
        );
        assert_eq!(
            ColumnType::infer(&cells(json!([1, {"a": 1}, "b"]))),
            ColumnType::Composite
        );
    }

    #[test]
    fn test_json_number_kinds() {
        assert_eq!(CellValue::from(json!(3)), CellValue::Int(3));
        assert_eq!(CellValue::from(json!(3.0)), CellValue::Real(3.0));
        assert_eq!(CellValue::from(json!("x")), CellValue::Str("x".into()));
    }

    #[test]
    fn test_serialize_keeps_int_and_real_apart() {
        let column = vec![CellValue::Int(1), CellValue::Real(1.0), CellValue::Null];
        let text = serde_json::to_string(&column).unwrap();
        assert_eq!(text, "[1,1.0,null]");
        let back: Vec<CellValue> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, column);
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Int(7).to_string(), "7");
        assert_eq!(CellValue::from("ab").to_string(), "ab");
        assert_eq!(CellValue::Real(f64::NAN).to_string(), "NaN");
        assert_eq!(CellValue::Null.to_string(), "");
    }
}
