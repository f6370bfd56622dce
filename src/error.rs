use thiserror::Error;

use crate::point::{Extent, Position};

pub type Result<T> = std::result::Result<T, DocumentError>;

/// Failures surfaced by [`TextDocument`](crate::buffer::TextDocument) and
/// the operation decoder. None of them are retried internally.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// An untyped batch was not a JSON array.
    #[error("operation batch must be an array, got {found}")]
    MalformedBatch { found: &'static str },

    /// An untyped operation had a `type` other than `insert` or `delete`.
    #[error("unknown operation type {kind:?}")]
    UnknownOperationKind { kind: String },

    /// An operation had a known `type` but its fields did not decode.
    #[error("malformed operation: {0}")]
    MalformedOperation(#[source] serde_json::Error),

    #[error(
        "cannot delete from ({}, {}) to ({}, {}) in a document ending at ({}, {})",
        .start.row, .start.column, .end.row, .end.column, .extent.row, .extent.column
    )]
    InvalidDeleteRange {
        start: Position,
        end: Position,
        extent: Extent,
    },

    /// The document was dropped before the awaited text appeared.
    #[error("document dropped while waiting for text")]
    Dropped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_delete_range_message_names_positions() {
        let err = DocumentError::InvalidDeleteRange {
            start: Position::new(0, 2),
            end: Position::new(0, 2),
            extent: Extent::new(0, 2),
        };
        assert_eq!(
            err.to_string(),
            "cannot delete from (0, 2) to (0, 2) in a document ending at (0, 2)"
        );
    }

    #[test]
    fn test_unknown_kind_message_quotes_kind() {
        let err = DocumentError::UnknownOperationKind {
            kind: "replace".to_string(),
        };
        assert_eq!(err.to_string(), "unknown operation type \"replace\"");
    }
}
