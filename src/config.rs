use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub quiet: bool,
    pub json: bool,
    pub no_banner: bool,
    pub marker: Option<char>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            quiet: self.quiet || other.quiet,
            json: self.json || other.json,
            no_banner: self.no_banner || other.no_banner,
            marker: other.marker.or(self.marker),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("rowedit").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("rowedit")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("rowedit").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("rowedit").join("config");
        }
    }

    PathBuf::from(".roweditrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".roweditrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# rowedit defaults (saved with --save)".to_string());
    if flags.quiet {
        lines.push("--quiet".to_string());
    }
    if flags.json {
        lines.push("--json".to_string());
    }
    if flags.no_banner {
        lines.push("--no-banner".to_string());
    }
    if let Some(marker) = flags.marker {
        lines.push(format!("--marker {marker}"));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--quiet" || token == "-q" {
            flags.quiet = true;
        } else if token == "--json" {
            flags.json = true;
        } else if token == "--no-banner" {
            flags.no_banner = true;
        } else if token == "--marker" {
            if let Some(next) = tokens.get(i + 1) {
                flags.marker = parse_marker(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--marker=") {
            flags.marker = parse_marker(value);
        }
        i += 1;
    }
    flags
}

/// A marker must be exactly one character.
fn parse_marker(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}
