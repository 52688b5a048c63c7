use crate::app::Model;
use crate::editor::Direction;

/// All edits and navigation the loop can apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Insert text before the cursor
    Insert(String),
    /// Delete character before cursor, or join with the previous row
    Backspace,
    /// Split the row at the cursor
    Enter,
    /// Move cursor in a direction
    Move(Direction),
    /// Stop the loop
    Quit,
}

/// Apply a message to the model and return the new state.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::Insert(text) => model.buffer.insert(&text),
        Message::Backspace => {
            model.buffer.backspace();
        }
        Message::Enter => model.buffer.enter(),
        Message::Move(direction) => model.buffer.move_cursor(direction),
        Message::Quit => {
            model.should_quit = true;
            return model;
        }
    }
    model.commands_applied += 1;
    model
}
