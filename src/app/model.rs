use crate::editor::{DEFAULT_MARKER, EditorBuffer};

/// The complete loop state.
///
/// All state lives here: the buffer being edited and the loop's own
/// bookkeeping.
#[derive(Debug)]
pub struct Model {
    /// The text being edited.
    pub buffer: EditorBuffer,
    /// Set once a quit command has been applied.
    pub should_quit: bool,
    /// Number of edit and navigation messages applied so far.
    pub commands_applied: usize,
}

impl Model {
    /// Create a model with an empty buffer whose cursor is drawn as `marker`.
    pub fn new(marker: char) -> Self {
        Self {
            buffer: EditorBuffer::with_marker(marker),
            should_quit: false,
            commands_applied: 0,
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}
