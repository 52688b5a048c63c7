// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorBuffer)
    clippy::module_name_repetitions
)]

//! # rowedit
//!
//! An in-memory, cursor-based text buffer for line-oriented editing.
//!
//! The buffer stores a doubly-linked list of rows, each holding a
//! doubly-linked list of characters. The cursor is itself a node in the
//! active row, so rendering a row shows the cursor marker in place.
//!
//! ## Architecture
//!
//! - [`list`]: arena-backed doubly-linked list splice primitives
//! - [`editor`]: the row/character buffer with insert, backspace, enter and
//!   cursor movement
//! - [`app`]: command loop in The Elm Architecture (TEA) style
//! - [`config`]: saved default flags
//!
//! ```
//! use rowedit::editor::EditorBuffer;
//!
//! let mut buf = EditorBuffer::new();
//! buf.insert("AB");
//! buf.enter();
//! buf.insert("CD");
//! buf.move_left();
//! buf.move_left();
//! buf.backspace();
//! assert_eq!(buf.lines().collect::<Vec<_>>(), vec!["AB|CD"]);
//! ```

pub mod app;
pub mod config;
pub mod editor;
pub mod list;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::{Direction, EditorBuffer, Position};
}
