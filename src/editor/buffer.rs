use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::InvariantError;
use crate::list::{Arena, Chain, NodeId};

/// Character shown in the cursor's cell unless another marker is chosen.
pub const DEFAULT_MARKER: char = '|';

/// Cursor position in the editor buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Zero-based row index.
    pub row: usize,
    /// Zero-based column: characters before the cursor in its row.
    pub col: usize,
}

impl Position {
    /// Create a position at a specific row and column.
    pub const fn at(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Where the cursor lands when it is attached to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttachAt {
    /// After this many characters, or at the row end if the row is shorter.
    Column(usize),
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowStep {
    Prev,
    Next,
}

/// A text buffer made of linked rows of linked characters.
///
/// The cursor is a real node in the active row's character list. Its value
/// is the marker character, and the buffer keeps its row index and column
/// in step with where the node is linked. There is always at least one row.
///
/// ```
/// use rowedit::editor::EditorBuffer;
///
/// let mut buf = EditorBuffer::new();
/// buf.insert("HELLO");
/// buf.move_left();
/// buf.move_left();
/// buf.enter();
/// assert_eq!(buf.lines().collect::<Vec<_>>(), vec!["HEL", "|LO"]);
/// ```
pub struct EditorBuffer {
    /// Each row's value is the head of its character list.
    rows: Arena<Option<NodeId>>,
    chars: Arena<char>,
    row_head: NodeId,
    curr_row: NodeId,
    cursor: NodeId,
    cursor_position: usize,
    cursor_row: usize,
}

impl EditorBuffer {
    /// Create a buffer holding one empty row and the cursor.
    pub fn new() -> Self {
        Self::with_marker(DEFAULT_MARKER)
    }

    /// Create an empty buffer whose cursor is drawn as `marker`.
    pub fn with_marker(marker: char) -> Self {
        let mut chars = Arena::new();
        let cursor = chars.alloc(marker);
        let mut rows = Arena::new();
        let row = rows.alloc(Some(cursor));
        Self {
            rows,
            chars,
            row_head: row,
            curr_row: row,
            cursor,
            cursor_position: 0,
            cursor_row: 0,
        }
    }

    /// The character drawn in the cursor's cell.
    pub fn marker(&self) -> char {
        self.chars.get(self.cursor).copied().unwrap_or(DEFAULT_MARKER)
    }

    /// The current cursor position.
    pub const fn cursor(&self) -> Position {
        Position::at(self.cursor_row, self.cursor_position)
    }

    /// Number of characters before the cursor in the active row.
    pub const fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Total number of rows.
    pub const fn line_count(&self) -> usize {
        self.rows.len()
    }

    /// Content of a row without the cursor marker.
    pub fn line_at(&self, row: usize) -> Option<String> {
        let row = self.row_at(row)?;
        Some(self.row_text(self.row_chars(row), false))
    }

    /// Number of characters in a row, not counting the cursor.
    pub fn line_len(&self, row: usize) -> usize {
        self.row_at(row).map_or(0, |row| {
            self.chars
                .iter(self.row_chars(row))
                .filter(|(id, _)| *id != self.cursor)
                .count()
        })
    }

    /// Rendered rows, each with the marker at the cursor's slot.
    ///
    /// The iterator only reads the buffer; calling this again restarts the
    /// traversal from the first row.
    pub fn lines(&self) -> Lines<'_> {
        Lines {
            buffer: self,
            rows: self.rows.iter(Some(self.row_head)),
            with_marker: true,
        }
    }

    /// Rows without the cursor marker.
    pub fn plain_lines(&self) -> Lines<'_> {
        Lines {
            with_marker: false,
            ..self.lines()
        }
    }

    /// The full text without the cursor marker, rows joined by `'\n'`.
    pub fn text(&self) -> String {
        self.plain_lines().collect::<Vec<_>>().join("\n")
    }

    /// Insert a character before the cursor.
    pub fn insert_char(&mut self, ch: char) {
        let node = self.chars.alloc(ch);
        let head = self.chars.insert_before(node, Some(self.cursor), self.head());
        self.set_head(head);
        self.cursor_position += 1;
    }

    /// Insert text before the cursor, one cell per `char`.
    ///
    /// A `'\n'` is stored as an ordinary cell; only [`enter`](Self::enter)
    /// splits rows.
    pub fn insert(&mut self, text: &str) {
        for ch in text.chars() {
            self.insert_char(ch);
        }
    }

    /// Delete the character before the cursor (Backspace).
    ///
    /// At the start of a row the row is merged onto the end of the previous
    /// one. Returns `true` if the buffer changed.
    pub fn backspace(&mut self) -> bool {
        if self.cursor_position > 0 {
            let out = self.chars.delete_prev(Some(self.cursor), self.head());
            self.set_head(out.head);
            if let Some(removed) = out.removed {
                self.chars.remove(removed);
            }
            self.cursor_position -= 1;
            return true;
        }
        if self.rows.prev(self.curr_row).is_none() {
            return false;
        }
        self.merge_with_previous_row();
        true
    }

    /// Split the active row at the cursor (Enter).
    ///
    /// Characters after the cursor move to a new row directly below, and the
    /// cursor starts that row.
    pub fn enter(&mut self) {
        match self.chars.prev(self.cursor) {
            Some(before) => self.chars.link(Some(before), None),
            None => self.set_head(None),
        }
        self.chars.link(None, Some(self.cursor));

        let row = self.rows.alloc(Some(self.cursor));
        if let Some(head) = self
            .rows
            .insert_after(row, Some(self.curr_row), Some(self.row_head))
        {
            self.row_head = head;
        }
        self.curr_row = row;
        self.cursor_position = 0;
        self.cursor_row += 1;
        debug!(row = self.cursor_row, "split row at cursor");
    }

    /// Move the cursor in the given direction.
    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_up(),
            Direction::Down => self.move_down(),
        }
    }

    /// Move one character left, wrapping to the end of the previous row.
    pub fn move_left(&mut self) {
        if let Some(before) = self.chars.prev(self.cursor) {
            let head = self.chars.unlink(self.cursor, self.head());
            let head = self.chars.insert_before(self.cursor, Some(before), head);
            self.set_head(head);
            self.cursor_position -= 1;
        } else {
            self.relocate_cursor(RowStep::Prev, AttachAt::End);
        }
    }

    /// Move one character right, wrapping to the start of the next row.
    pub fn move_right(&mut self) {
        if let Some(after) = self.chars.next(self.cursor) {
            let head = self.chars.unlink(self.cursor, self.head());
            let head = self.chars.insert_after(self.cursor, Some(after), head);
            self.set_head(head);
            self.cursor_position += 1;
        } else {
            self.relocate_cursor(RowStep::Next, AttachAt::Column(0));
        }
    }

    /// Move to the same column of the previous row, clamped to its length.
    pub fn move_up(&mut self) {
        let column = self.cursor_position;
        self.relocate_cursor(RowStep::Prev, AttachAt::Column(column));
    }

    /// Move to the same column of the next row, clamped to its length.
    pub fn move_down(&mut self) {
        let column = self.cursor_position;
        self.relocate_cursor(RowStep::Next, AttachAt::Column(column));
    }

    /// Audit every structural invariant of the buffer.
    ///
    /// This walks the whole buffer; it is meant for tests and diagnostics,
    /// not for use between edits.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.rows.prev(self.row_head).is_some() {
            return Err(InvariantError::RowHeadHasPrev);
        }

        let mut prev_row = None;
        let mut active = None;
        let mut cursor_count = 0;
        let mut linked_rows = 0;
        let mut linked_chars = 0;

        for (row_index, (row, head)) in self.rows.iter(Some(self.row_head)).enumerate() {
            if self.rows.prev(row) != prev_row {
                return Err(InvariantError::BrokenRowLink { row: row_index });
            }
            if row == self.curr_row {
                active = Some(row_index);
            }

            let mut prev_char = None;
            for (column, (id, _)) in self.chars.iter(*head).enumerate() {
                if self.chars.prev(id) != prev_char {
                    return Err(InvariantError::BrokenCharLink {
                        row: row_index,
                        column,
                    });
                }
                if id == self.cursor {
                    cursor_count += 1;
                    if row != self.curr_row {
                        return Err(InvariantError::CursorOutsideActiveRow { row: row_index });
                    }
                    if column != self.cursor_position {
                        return Err(InvariantError::ColumnMismatch {
                            tracked: self.cursor_position,
                            actual: column,
                        });
                    }
                }
                prev_char = Some(id);
                linked_chars += 1;
            }

            prev_row = Some(row);
            linked_rows += 1;
        }

        if cursor_count != 1 {
            return Err(InvariantError::CursorCount {
                count: cursor_count,
            });
        }
        match active {
            None => return Err(InvariantError::ActiveRowDetached),
            Some(actual) if actual != self.cursor_row => {
                return Err(InvariantError::RowMismatch {
                    tracked: self.cursor_row,
                    actual,
                });
            }
            Some(_) => {}
        }
        if linked_rows != self.rows.len() {
            return Err(InvariantError::OrphanRows {
                live: self.rows.len(),
                linked: linked_rows,
            });
        }
        if linked_chars != self.chars.len() {
            return Err(InvariantError::OrphanCharacters {
                live: self.chars.len(),
                linked: linked_chars,
            });
        }
        Ok(())
    }

    // --- Private helpers ---

    /// Head of the active row's character list.
    fn head(&self) -> Option<NodeId> {
        self.row_chars(self.curr_row)
    }

    fn set_head(&mut self, head: Option<NodeId>) {
        self.set_row_chars(self.curr_row, head);
    }

    fn row_chars(&self, row: NodeId) -> Option<NodeId> {
        self.rows.get(row).copied().flatten()
    }

    fn set_row_chars(&mut self, row: NodeId, head: Option<NodeId>) {
        if let Some(slot) = self.rows.get_mut(row) {
            *slot = head;
        }
    }

    fn row_at(&self, index: usize) -> Option<NodeId> {
        self.rows
            .iter(Some(self.row_head))
            .nth(index)
            .map(|(row, _)| row)
    }

    fn row_text(&self, head: Option<NodeId>, with_marker: bool) -> String {
        self.chars
            .iter(head)
            .filter(|(id, _)| with_marker || *id != self.cursor)
            .map(|(_, ch)| *ch)
            .collect()
    }

    /// Move the cursor into the neighbouring row.
    ///
    /// Detach and attach only ever run together here, so the cursor is in
    /// exactly one row whenever this returns. Returns `false` when there is
    /// no row in that direction.
    fn relocate_cursor(&mut self, step: RowStep, at: AttachAt) -> bool {
        let target = match step {
            RowStep::Prev => self.rows.prev(self.curr_row),
            RowStep::Next => self.rows.next(self.curr_row),
        };
        let Some(target) = target else {
            return false;
        };

        self.detach_cursor();
        self.curr_row = target;
        self.cursor_position = self.attach_cursor(at);
        match step {
            RowStep::Prev => self.cursor_row -= 1,
            RowStep::Next => self.cursor_row += 1,
        }
        debug!(
            row = self.cursor_row,
            col = self.cursor_position,
            "cursor moved to another row"
        );
        true
    }

    fn detach_cursor(&mut self) {
        let head = self.chars.unlink(self.cursor, self.head());
        self.set_head(head);
    }

    /// Link the detached cursor into the active row and return its column.
    fn attach_cursor(&mut self, at: AttachAt) -> usize {
        let limit = match at {
            AttachAt::Column(column) => column,
            AttachAt::End => usize::MAX,
        };
        let mut anchor = None;
        let mut walk = self.head();
        let mut column = 0;
        while column < limit {
            let Some(node) = walk else {
                break;
            };
            anchor = Some(node);
            walk = self.chars.next(node);
            column += 1;
        }
        let head = self.chars.insert_after(self.cursor, anchor, self.head());
        self.set_head(head);
        column
    }

    /// Join the active row onto the end of the previous row.
    ///
    /// The cursor ends up between the two rows' contents.
    fn merge_with_previous_row(&mut self) {
        let merged = self.curr_row;
        if !self.relocate_cursor(RowStep::Prev, AttachAt::End) {
            return;
        }

        // The cursor is now last in its row; hang the merged row's
        // characters off it.
        let trailing = self.row_chars(merged);
        self.chars.link(Some(self.cursor), trailing);
        self.set_row_chars(merged, None);

        let out = self.rows.delete_next(Some(self.curr_row), Some(self.row_head));
        if let Some(head) = out.head {
            self.row_head = head;
        }
        if let Some(removed) = out.removed {
            self.rows.remove(removed);
        }
        debug!(
            row = self.cursor_row,
            col = self.cursor_position,
            "merged row into previous row"
        );
    }
}

impl Default for EditorBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EditorBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, line) in self.lines().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&line)?;
        }
        Ok(())
    }
}

impl fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorBuffer")
            .field("rows", &self.rows.len())
            .field("chars", &self.chars.len())
            .field("cursor", &self.cursor())
            .field("marker", &self.marker())
            .finish()
    }
}

/// Lazy iterator over the rows of an [`EditorBuffer`].
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    buffer: &'a EditorBuffer,
    rows: Chain<'a, Option<NodeId>>,
    with_marker: bool,
}

impl Iterator for Lines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let (_, head) = self.rows.next()?;
        Some(self.buffer.row_text(*head, self.with_marker))
    }
}
