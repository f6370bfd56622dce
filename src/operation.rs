//! Edit descriptors exchanged with callers.
//!
//! On the wire an operation is a JSON object tagged by `type`:
//!
//! ```json
//! {"type": "insert", "position": {"row": 0, "column": 3}, "text": "abc"}
//! {"type": "delete", "position": {"row": 1, "column": 0}, "extent": {"row": 0, "column": 2}}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DocumentError, Result};
use crate::point::{Extent, Position, extent_for_text};

/// A single insert-or-delete edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Operation {
    Insert { position: Position, text: String },
    Delete { position: Position, extent: Extent },
}

impl Operation {
    /// An insert of `text` at `position`.
    pub fn insert(position: Position, text: impl Into<String>) -> Self {
        Self::Insert {
            position,
            text: text.into(),
        }
    }

    /// A delete of `extent` starting at `position`.
    pub const fn delete(position: Position, extent: Extent) -> Self {
        Self::Delete { position, extent }
    }

    /// Where the operation starts.
    pub const fn position(&self) -> Position {
        match self {
            Self::Insert { position, .. } | Self::Delete { position, .. } => *position,
        }
    }

    /// The operation that undoes this one, when the descriptor alone is enough.
    ///
    /// A delete descriptor does not carry the removed text, so it has no inverse.
    pub fn inverse(&self) -> Option<Self> {
        match self {
            Self::Insert { position, text } => Some(Self::Delete {
                position: *position,
                extent: extent_for_text(text),
            }),
            Self::Delete { .. } => None,
        }
    }

    /// Decode an operation from untyped JSON.
    ///
    /// # Errors
    /// `UnknownOperationKind` when `type` is missing or not `insert`/`delete`,
    /// `MalformedOperation` when the remaining fields do not fit.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value.get("type") {
            Some(Value::String(kind)) if kind == "insert" || kind == "delete" => {
                Self::deserialize(value).map_err(DocumentError::MalformedOperation)
            }
            Some(Value::String(kind)) => Err(DocumentError::UnknownOperationKind {
                kind: kind.clone(),
            }),
            Some(other) => Err(DocumentError::UnknownOperationKind {
                kind: other.to_string(),
            }),
            None => Err(DocumentError::UnknownOperationKind {
                kind: String::new(),
            }),
        }
    }
}

/// Decode a whole batch. Nothing is returned unless every element decodes.
///
/// # Errors
/// `MalformedBatch` when `value` is not an array, otherwise the first
/// element error from [`Operation::from_value`].
pub fn decode_batch(value: &Value) -> Result<Vec<Operation>> {
    let Value::Array(items) = value else {
        return Err(DocumentError::MalformedBatch {
            found: json_kind(value),
        });
    };
    items.iter().map(Operation::from_value).collect()
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
