//! The document model: a rope-backed text buffer addressed by (row, column),
//! with single and batched edits and text-equality waiters.

mod document;
mod waiters;

pub use document::TextDocument;
pub use waiters::TextMatch;
