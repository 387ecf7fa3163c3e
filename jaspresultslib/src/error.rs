//! Error types for jaspresultslib

use thiserror::Error;

/// Errors that can occur while building, restoring or addressing results
#[derive(Error, Debug)]
pub enum ResultsError {
    /// The input value does not have a shape the operation understands
    #[error(
        "cannot {operation} from {shape} input, try a list, dataframe, vector or matrix instead"
    )]
    UnsupportedShape {
        operation: &'static str,
        shape: String,
    },

    /// A field the operation cannot do without was not given
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A node handle that does not belong to the arena
    #[error("no result node with handle {0}")]
    UnknownNode(usize),

    /// Only containers can hold other result nodes
    #[error("result node {0} is not a container")]
    NotAContainer(usize),

    /// A snapshot document that is not a table or plot snapshot
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ResultsError {
    /// Shorthand for an unsupported-shape error
    pub(crate) fn unsupported(operation: &'static str, shape: impl Into<String>) -> Self {
        ResultsError::UnsupportedShape {
            operation,
            shape: shape.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_shape_message() {
        let err = ResultsError::unsupported("add rows", "matrix");
        let msg = err.to_string();
        assert!(msg.starts_with("cannot add rows from matrix input"));
    }

    #[test]
    fn test_missing_field_message() {
        let err = ResultsError::MissingField("message");
        assert_eq!(err.to_string(), "missing required field: message");
    }
}
