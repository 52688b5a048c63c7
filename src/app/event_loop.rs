use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::app::input::insert_text;
use crate::app::{
    App, COMMAND_PROMPT, Command, INVALID_COMMAND, Model, TEXT_PROMPT, parse_command, render,
    update,
};

impl App {
    /// Run the loop on stdin, or on the configured script, printing to stdout.
    ///
    /// Returns the final state once a quit command is read or input ends.
    pub fn run(&self) -> Result<Model> {
        let writer = BufWriter::new(io::stdout().lock());
        match &self.script {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open script {}", path.display()))?;
                self.run_with(BufReader::new(file), writer)
            }
            None => self.run_with(io::stdin().lock(), writer),
        }
    }

    /// Run the loop over arbitrary input and output streams.
    pub fn run_with<R: BufRead, W: Write>(&self, mut reader: R, mut writer: W) -> Result<Model> {
        info!(style = ?self.style, "starting command loop");
        let mut model = Model::new(self.marker);
        let mut line = String::new();

        while !model.should_quit {
            if self.prompts {
                writeln!(writer, "{COMMAND_PROMPT}")?;
            }
            writer.flush()?;

            line.clear();
            if reader
                .read_line(&mut line)
                .context("Failed to read command")?
                == 0
            {
                break;
            }

            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(err) => {
                    debug!(%err, "rejected command");
                    writeln!(writer, "{INVALID_COMMAND}")?;
                    continue;
                }
            };

            let mut text = String::new();
            if command == Command::Insert {
                if self.prompts {
                    writeln!(writer, "{TEXT_PROMPT}")?;
                }
                writer.flush()?;
                reader
                    .read_line(&mut text)
                    .context("Failed to read text to insert")?;
                text = insert_text(&text).to_string();
            }

            model = update(model, command.into_message(text));
            if !model.should_quit {
                render(&mut writer, &model.buffer, self.style)?;
            }
        }

        writer.flush()?;
        info!(
            commands = model.commands_applied,
            rows = model.buffer.line_count(),
            "command loop finished"
        );
        Ok(model)
    }
}
