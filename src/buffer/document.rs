use ropey::Rope;
use serde_json::Value;
use tracing::{debug, trace};

use super::waiters::{TextMatch, Waiters};
use crate::config::DocumentOptions;
use crate::error::{DocumentError, Result};
use crate::operation::{Operation, decode_batch};
use crate::point::{Extent, Position};

/// An in-memory text document addressed by (row, column).
///
/// Edits are synchronous. Callers that need to observe the text reaching a
/// particular value register with [`TextDocument::when_text_equals`]; those
/// registrations are woken inside the `insert` or `delete` call that
/// produces the matching text.
pub struct TextDocument {
    rope: Rope,
    waiters: Waiters,
    options: DocumentOptions,
}

impl TextDocument {
    /// Create a document holding `text`, with default options.
    pub fn new(text: &str) -> Self {
        Self::with_options(text, DocumentOptions::default())
    }

    /// Create a document holding `text` with explicit options.
    pub fn with_options(text: &str, options: DocumentOptions) -> Self {
        Self {
            rope: Rope::from_str(text),
            waiters: Waiters::default(),
            options,
        }
    }

    /// The options this document was created with.
    pub const fn options(&self) -> DocumentOptions {
        self.options
    }

    /// The full text content of the document.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Replace the whole text.
    ///
    /// Waiters are only swept when `sweep_on_set_text` is enabled.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        trace!(chars = self.rope.len_chars(), "set_text");
        if self.options.sweep_on_set_text {
            self.resolve_on_text_equality();
        }
    }

    /// Number of rows, counting the (possibly empty) row after a trailing newline.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// The extent of the whole document from (0, 0).
    pub fn extent(&self) -> Extent {
        let last_row = self.rope.len_lines() - 1;
        let last_row_start = self.rope.line_to_char(last_row);
        Extent::new(last_row, self.rope.len_chars() - last_row_start)
    }

    /// Char offset of the first position not less than `target`.
    ///
    /// Same result as [`crate::point::character_index_for_position`] on
    /// [`Self::text`], computed from the rope's line index.
    pub fn character_index_for_position(&self, target: Position) -> usize {
        if target.row >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        // The line slice includes its newline, so an overlong column lands
        // on the start of the next row.
        let line_start = self.rope.line_to_char(target.row);
        line_start + target.column.min(self.rope.line(target.row).len_chars())
    }

    /// Splice `text` in at `position` and return the applied operation.
    pub fn insert(&mut self, position: Position, text: &str) -> Operation {
        let index = self.character_index_for_position(position);
        self.rope.insert(index, text);
        if self.options.trace_edits() {
            debug!(
                row = position.row,
                column = position.column,
                index,
                chars = text.chars().count(),
                "insert"
            );
        }
        self.resolve_on_text_equality();
        Operation::insert(position, text)
    }

    /// Remove `extent` starting at `start` and return the applied operation.
    ///
    /// # Errors
    /// `InvalidDeleteRange` if `start` is at or past the end of the document,
    /// or the end reached by traversing `extent` lies past it (including ends
    /// that overflow `usize`). The document is left unchanged.
    pub fn delete(&mut self, start: Position, extent: Extent) -> Result<Operation> {
        let end = start.checked_traverse(extent);
        let text_extent = self.extent();
        let text_end = text_extent.end_position();
        let end = match end {
            Some(end) if start < text_end && end <= text_end => end,
            _ => {
                return Err(DocumentError::InvalidDeleteRange {
                    start,
                    // overflowing ends are reported saturated
                    end: end.unwrap_or(Position::new(usize::MAX, usize::MAX)),
                    extent: text_extent,
                });
            }
        };

        let start_index = self.character_index_for_position(start);
        let end_index = self.character_index_for_position(end);
        self.rope.remove(start_index..end_index);
        if self.options.trace_edits() {
            debug!(
                row = start.row,
                column = start.column,
                start_index,
                end_index,
                "delete"
            );
        }
        self.resolve_on_text_equality();
        Ok(Operation::delete(start, extent))
    }

    /// Apply a single operation.
    ///
    /// # Errors
    /// Propagates [`Self::delete`] failures.
    pub fn apply(&mut self, operation: &Operation) -> Result<Operation> {
        match operation {
            Operation::Insert { position, text } => Ok(self.insert(*position, text)),
            Operation::Delete { position, extent } => self.delete(*position, *extent),
        }
    }

    /// Apply a batch from last to first.
    ///
    /// Every position in the batch is expected to refer to the text as it was
    /// before the batch, ordered so that applying from the end backward keeps
    /// the earlier positions valid. No sorting or rebasing happens here.
    ///
    /// # Errors
    /// Stops at the first failing operation. Operations already applied stay
    /// applied.
    pub fn apply_many(&mut self, operations: &[Operation]) -> Result<()> {
        debug!(count = operations.len(), "apply_many");
        for operation in operations.iter().rev() {
            if let Err(err) = self.apply(operation) {
                let at = operation.position();
                debug!(row = at.row, column = at.column, %err, "apply_many aborted");
                return Err(err);
            }
        }
        Ok(())
    }

    /// Decode an untyped batch and apply it with [`Self::apply_many`].
    ///
    /// # Errors
    /// `MalformedBatch` or `UnknownOperationKind` from decoding, in which case
    /// nothing is applied; otherwise as [`Self::apply_many`].
    pub fn apply_many_value(&mut self, operations: &Value) -> Result<()> {
        let operations = decode_batch(operations)?;
        self.apply_many(&operations)
    }

    /// A future that completes when the text equals `text`.
    ///
    /// Completes immediately if it already does. Otherwise it stays pending
    /// until an edit produces exactly `text`; there is no timeout.
    pub fn when_text_equals(&mut self, text: impl Into<String>) -> TextMatch {
        let text = text.into();
        if self.rope == text.as_str() {
            return TextMatch::ready();
        }
        trace!(chars = text.chars().count(), "waiting for text");
        self.waiters.register(text)
    }

    /// Registrations still waiting, excluding ones whose future was dropped.
    pub fn pending_waiters(&self) -> usize {
        self.waiters.live_count()
    }

    fn resolve_on_text_equality(&mut self) {
        if self.waiters.is_empty() {
            return;
        }
        let rope = &self.rope;
        let woken = self
            .waiters
            .resolve(|key| key.len() == rope.len_bytes() && *rope == key);
        if woken > 0 {
            trace!(woken, "text matched");
        }
    }
}

impl std::fmt::Debug for TextDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextDocument")
            .field(
                "rope",
                &format_args!(
                    "Rope({} lines, {} chars)",
                    self.rope.len_lines(),
                    self.rope.len_chars()
                ),
            )
            .field("waiters", &self.waiters.live_count())
            .field("options", &self.options)
            .finish()
    }
}
