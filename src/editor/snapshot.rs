//! Serializable view of a buffer's content and cursor.

use serde::{Deserialize, Serialize};

use super::{EditorBuffer, Position};

/// Buffer state at one point in time: rows without the marker, plus the
/// cursor position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub lines: Vec<String>,
    pub cursor: Position,
}

impl EditorBuffer {
    /// Capture the current rows and cursor.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            lines: self.plain_lines().collect(),
            cursor: self.cursor(),
        }
    }
}
