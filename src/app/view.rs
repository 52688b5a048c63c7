use std::io::Write;

use anyhow::{Context, Result};

use crate::editor::EditorBuffer;

/// Line printed before the rows of a banner frame.
pub const BANNER_START: &str =
    "------------------------ Text Editor Start ------------------------";
/// Line printed after the rows of a banner frame.
pub const BANNER_END: &str =
    "------------------------- Text Editor End -------------------------";

/// How the buffer is printed after each command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputStyle {
    /// Rows between start and end banner lines
    #[default]
    Banner,
    /// Rows only
    Plain,
    /// One JSON snapshot per line
    Json,
}

impl OutputStyle {
    /// Pick a style from the `--json` and `--no-banner` flags; JSON wins.
    pub const fn from_flags(json: bool, no_banner: bool) -> Self {
        if json {
            Self::Json
        } else if no_banner {
            Self::Plain
        } else {
            Self::Banner
        }
    }
}

/// Write one frame showing the buffer.
pub fn render<W: Write>(writer: &mut W, buffer: &EditorBuffer, style: OutputStyle) -> Result<()> {
    match style {
        OutputStyle::Banner => {
            writeln!(writer, "{BANNER_START}")?;
            write_rows(writer, buffer)?;
            writeln!(writer, "{BANNER_END}")?;
        }
        OutputStyle::Plain => write_rows(writer, buffer)?,
        OutputStyle::Json => {
            serde_json::to_writer(&mut *writer, &buffer.snapshot())
                .context("Failed to encode snapshot")?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

fn write_rows<W: Write>(writer: &mut W, buffer: &EditorBuffer) -> Result<()> {
    for line in buffer.lines() {
        writeln!(writer, "{line}")?;
    }
    Ok(())
}
