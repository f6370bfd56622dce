#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions
)]

//! # Textdoc
//!
//! A minimal in-memory text document driven by row/column edits.
//!
//! A test harness constructs a [`TextDocument`](buffer::TextDocument),
//! applies inserts and deletes expressed in 2-D coordinates, and awaits
//! [`when_text_equals`](buffer::TextDocument::when_text_equals) to learn
//! when the text reaches an expected value.
//!
//! ## Modules
//!
//! - [`point`]: Position and extent arithmetic
//! - [`operation`]: Insert/delete descriptors and their JSON form
//! - [`buffer`]: The document and its waiters
//! - [`config`]: Behavior switches
//! - [`error`]: Error type

pub mod buffer;
pub mod config;
pub mod error;
pub mod operation;
pub mod point;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::buffer::{TextDocument, TextMatch};
    pub use crate::config::DocumentOptions;
    pub use crate::error::{DocumentError, Result};
    pub use crate::operation::Operation;
    pub use crate::point::{Extent, Position};
}
