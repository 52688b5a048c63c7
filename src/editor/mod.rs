//! Line-structured text buffer with a cursor spliced into the text.
//!
//! Rows form a doubly-linked list, and each row owns a doubly-linked list
//! of characters. The cursor is one of those character nodes: it sits in
//! the active row's list holding the marker character, so rendering a row
//! shows the cursor where it is.

mod buffer;
mod error;
mod snapshot;

pub use buffer::{DEFAULT_MARKER, Direction, EditorBuffer, Lines, Position};
pub use error::InvariantError;
pub use snapshot::Snapshot;
