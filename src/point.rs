//! Row/column addressing for text.
//!
//! Rows are split on `\n` only. Columns count `char`s (Unicode scalar
//! values), not bytes and not grapheme clusters.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A logical location in text. 0-indexed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

/// A relative displacement between two positions.
///
/// When `row` is zero, `column` is a delta on the same line. Otherwise
/// `column` is absolute on the destination line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extent {
    pub row: usize,
    pub column: usize,
}

impl Position {
    /// Row 0, column 0.
    pub const ZERO: Self = Self { row: 0, column: 0 };

    /// Create a position at a specific row and column.
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Like [`Self::traverse`], but `None` if the result does not fit in `usize`.
    pub const fn checked_traverse(self, distance: Extent) -> Option<Self> {
        if distance.row == 0 {
            match self.column.checked_add(distance.column) {
                Some(column) => Some(Self {
                    row: self.row,
                    column,
                }),
                None => None,
            }
        } else {
            match self.row.checked_add(distance.row) {
                Some(row) => Some(Self {
                    row,
                    column: distance.column,
                }),
                None => None,
            }
        }
    }

    /// The position reached by moving `distance` from `self`.
    ///
    /// # Panics
    /// On `usize` overflow in debug builds. Use [`Self::checked_traverse`]
    /// for untrusted input.
    pub const fn traverse(self, distance: Extent) -> Self {
        if distance.row == 0 {
            Self {
                row: self.row,
                column: self.column + distance.column,
            }
        } else {
            Self {
                row: self.row + distance.row,
                column: distance.column,
            }
        }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row
            .cmp(&other.row)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Extent {
    /// Create an extent spanning `row` newlines, ending at `column`.
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Whether this extent covers no text at all.
    pub const fn is_empty(self) -> bool {
        self.row == 0 && self.column == 0
    }

    /// Where this extent ends when it starts at the top of the text.
    pub const fn end_position(self) -> Position {
        Position::ZERO.traverse(self)
    }
}

/// Lexicographic (row, column) comparison.
pub fn compare(a: Position, b: Position) -> Ordering {
    a.cmp(&b)
}

/// See [`Position::traverse`].
pub const fn traverse(start: Position, distance: Extent) -> Position {
    start.traverse(distance)
}

/// The extent spanned by `text` when inserted at (0, 0).
pub fn extent_for_text(text: &str) -> Extent {
    text.chars().fold(Extent::default(), |mut extent, ch| {
        if ch == '\n' {
            extent.row += 1;
            extent.column = 0;
        } else {
            extent.column += 1;
        }
        extent
    })
}

/// Char offset of the first position in `text` that is not less than `target`.
///
/// Scans from the start of `text`. A target past the end of the text yields
/// the text's char length. A column past the end of a line lands on the
/// start of the following line.
pub fn character_index_for_position(text: &str, target: Position) -> usize {
    let mut position = Position::ZERO;
    let mut index = 0;
    let mut chars = text.chars();
    while position < target {
        let Some(ch) = chars.next() else {
            break;
        };
        if ch == '\n' {
            position.row += 1;
            position.column = 0;
        } else {
            position.column += 1;
        }
        index += 1;
    }
    index
}

/// The position of the char offset `index` in `text`, clamped to the end.
pub fn position_for_character_index(text: &str, index: usize) -> Position {
    extent_for_text_prefix(text, index).end_position()
}

fn extent_for_text_prefix(text: &str, chars: usize) -> Extent {
    let end = text.char_indices().nth(chars).map_or(text.len(), |(i, _)| i);
    extent_for_text(&text[..end])
}
