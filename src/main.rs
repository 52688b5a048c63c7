//! rowedit - a line-oriented text editor over linked rows of characters.
//!
//! # Usage
//!
//! ```bash
//! rowedit
//! rowedit --marker _ --no-banner
//! rowedit --quiet --json commands.txt
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use rowedit::app::{App, OutputStyle};
use rowedit::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use rowedit::editor::DEFAULT_MARKER;

/// A line-oriented text editor driven by single-letter commands
#[derive(Parser, Debug)]
#[command(name = "rowedit", version, about, long_about = None)]
struct Cli {
    /// Read commands from this file instead of stdin
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,

    /// Character drawn at the cursor position
    #[arg(long, value_name = "CHAR")]
    marker: Option<char>,

    /// Print a JSON snapshot after each command
    #[arg(long)]
    json: bool,

    /// Print rows without the start/end banner lines
    #[arg(long)]
    no_banner: bool,

    /// Do not print command prompts
    #[arg(short, long)]
    quiet: bool,

    /// Save current command-line flags as defaults in the global config
    #[arg(long)]
    save: bool,

    /// Clear saved defaults in the global config
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so frames on stdout stay clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = ConfigFlags {
        marker: cli.marker,
        ..parse_flag_tokens(&raw_args)
    };

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    tracing::debug!(?effective, "resolved configuration");

    if let Some(script) = &cli.script {
        if !script.exists() {
            anyhow::bail!("Script not found: {}", script.display());
        }
    }

    let app = App::new()
        .with_marker(effective.marker.unwrap_or(DEFAULT_MARKER))
        .with_style(OutputStyle::from_flags(effective.json, effective.no_banner))
        .with_prompts(!effective.quiet)
        .with_script(cli.script);

    app.run().map(|_| ()).context("Application error")
}
