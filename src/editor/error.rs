use thiserror::Error;

/// A structural defect found by [`EditorBuffer::check_invariants`].
///
/// Rows and columns are zero-based.
///
/// [`EditorBuffer::check_invariants`]: super::EditorBuffer::check_invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("first row has a predecessor")]
    RowHeadHasPrev,
    #[error("row {row} is not back-linked to the row before it")]
    BrokenRowLink { row: usize },
    #[error("character at row {row}, column {column} is not back-linked to its predecessor")]
    BrokenCharLink { row: usize, column: usize },
    #[error("cursor found {count} times, expected exactly once")]
    CursorCount { count: usize },
    #[error("cursor sits in row {row}, which is not the active row")]
    CursorOutsideActiveRow { row: usize },
    #[error("tracked column {tracked} but cursor is at column {actual}")]
    ColumnMismatch { tracked: usize, actual: usize },
    #[error("tracked row {tracked} but active row is row {actual}")]
    RowMismatch { tracked: usize, actual: usize },
    #[error("active row is not in the row chain")]
    ActiveRowDetached,
    #[error("{live} rows allocated but {linked} reachable")]
    OrphanRows { live: usize, linked: usize },
    #[error("{live} characters allocated but {linked} reachable")]
    OrphanCharacters { live: usize, linked: usize },
}
