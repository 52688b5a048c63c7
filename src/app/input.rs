use thiserror::Error;

use crate::app::Message;
use crate::editor::Direction;

/// A command letter typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `I`: the text to insert follows on the next line
    Insert,
    /// `B`
    Backspace,
    /// `N`
    Enter,
    /// `L`
    Left,
    /// `R`
    Right,
    /// `U`
    Up,
    /// `D`
    Down,
    /// `Q`
    Quit,
}

impl Command {
    /// The message for this command, given the text line read for inserts.
    pub fn into_message(self, text: String) -> Message {
        match self {
            Self::Insert => Message::Insert(text),
            Self::Backspace => Message::Backspace,
            Self::Enter => Message::Enter,
            Self::Left => Message::Move(Direction::Left),
            Self::Right => Message::Move(Direction::Right),
            Self::Up => Message::Move(Direction::Up),
            Self::Down => Message::Move(Direction::Down),
            Self::Quit => Message::Quit,
        }
    }
}

/// Why a command line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(char),
}

/// Parse one command line.
///
/// Only the first non-blank character counts, in either case, so `insert`
/// and `i` both mean [`Command::Insert`].
pub fn parse_command(line: &str) -> Result<Command, ParseCommandError> {
    let key = line
        .trim()
        .chars()
        .next()
        .ok_or(ParseCommandError::Empty)?;
    match key.to_ascii_uppercase() {
        'I' => Ok(Command::Insert),
        'B' => Ok(Command::Backspace),
        'N' => Ok(Command::Enter),
        'L' => Ok(Command::Left),
        'R' => Ok(Command::Right),
        'U' => Ok(Command::Up),
        'D' => Ok(Command::Down),
        'Q' => Ok(Command::Quit),
        _ => Err(ParseCommandError::Unknown(key)),
    }
}

/// Strip the line terminator from a text line read for an insert.
pub(super) fn insert_text(line: &str) -> &str {
    line.strip_suffix('\n')
        .map_or(line, |rest| rest.strip_suffix('\r').unwrap_or(rest))
}
