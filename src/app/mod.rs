//! Line-oriented command loop over an [`EditorBuffer`].
//!
//! This module follows The Elm Architecture (TEA):
//! - [`Model`]: the complete loop state
//! - [`Message`]: every edit or navigation the user can request
//! - [`update`]: pure function for state transitions
//! - [`App::run`]: reads commands, applies them and prints a frame after each
//!
//! [`EditorBuffer`]: crate::editor::EditorBuffer

mod event_loop;
mod input;
mod model;
mod update;
mod view;

pub use input::{Command, ParseCommandError, parse_command};
pub use model::Model;
pub use update::{Message, update};
pub use view::{BANNER_END, BANNER_START, OutputStyle, render};

use std::path::PathBuf;

use crate::editor::DEFAULT_MARKER;

/// Prompt printed before each command is read.
pub const COMMAND_PROMPT: &str =
    "Enter command (I: Insert, B: Backspace, N: Enter, L: Left, R: Right, U: Up, D: Down, Q: Quit): ";
/// Prompt printed before the text of an insert command is read.
pub const TEXT_PROMPT: &str = "Enter text to insert: ";
/// Reply to a command letter that is not recognised.
pub const INVALID_COMMAND: &str = "Invalid command!";

/// Main application struct holding the loop configuration.
#[derive(Debug, Clone)]
pub struct App {
    marker: char,
    style: OutputStyle,
    prompts: bool,
    script: Option<PathBuf>,
}

impl App {
    /// Create an application reading commands from stdin.
    pub const fn new() -> Self {
        Self {
            marker: DEFAULT_MARKER,
            style: OutputStyle::Banner,
            prompts: true,
            script: None,
        }
    }

    /// Set the character drawn at the cursor.
    pub const fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }

    /// Choose how the buffer is printed after each command.
    pub const fn with_style(mut self, style: OutputStyle) -> Self {
        self.style = style;
        self
    }

    /// Enable or disable the command and text prompts.
    pub const fn with_prompts(mut self, enabled: bool) -> Self {
        self.prompts = enabled;
        self
    }

    /// Read commands from a file instead of stdin.
    pub fn with_script(mut self, script: Option<PathBuf>) -> Self {
        self.script = script;
        self
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
