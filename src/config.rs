//! Saved defaults.
//!
//! Defaults are stored as command-line flags, one or more per line, in a
//! global config file with an optional local `.robolistrc` override. Flags
//! given on the command line win over saved ones.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub const DEFAULT_TICK_MS: u64 = 1000;
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub tick_ms: Option<u64>,
    pub debounce_ms: Option<u64>,
    pub avatar_url: Option<String>,
    pub seed: Option<u64>,
    pub no_images: bool,
    pub force_half_cell: bool,
    pub paused: bool,
    pub perf: bool,
    pub debug_log: Option<PathBuf>,
    /// Flag values that could not be parsed, kept for reporting once
    /// logging is up.
    pub rejected: Vec<String>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: booleans accumulate, options from `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            tick_ms: other.tick_ms.or(self.tick_ms),
            debounce_ms: other.debounce_ms.or(self.debounce_ms),
            avatar_url: other.avatar_url.clone().or_else(|| self.avatar_url.clone()),
            seed: other.seed.or(self.seed),
            no_images: self.no_images || other.no_images,
            force_half_cell: self.force_half_cell || other.force_half_cell,
            paused: self.paused || other.paused,
            perf: self.perf || other.perf,
            debug_log: other.debug_log.clone().or_else(|| self.debug_log.clone()),
            rejected: self
                .rejected
                .iter()
                .chain(&other.rejected)
                .cloned()
                .collect(),
        }
    }

    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_ms.filter(|ms| *ms > 0).unwrap_or(DEFAULT_TICK_MS)
    }

    pub fn debounce_window_ms(&self) -> u64 {
        self.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS)
    }

    pub fn avatar_base_url(&self) -> &str {
        self.avatar_url
            .as_deref()
            .unwrap_or(crate::avatar::DEFAULT_AVATAR_BASE_URL)
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("robolist").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("robolist")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("robolist").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("robolist")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".robolistrc")
}

/// Load flags from `path`. A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
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

/// Write `flags` to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# robolist defaults (saved with --save)".to_string()];
    if let Some(ms) = flags.tick_ms {
        lines.push(format!("--tick-ms {ms}"));
    }
    if let Some(ms) = flags.debounce_ms {
        lines.push(format!("--debounce-ms {ms}"));
    }
    if let Some(url) = &flags.avatar_url {
        lines.push(format!("--avatar-url {url}"));
    }
    if let Some(seed) = flags.seed {
        lines.push(format!("--seed {seed}"));
    }
    if flags.no_images {
        lines.push("--no-images".to_string());
    }
    if flags.force_half_cell {
        lines.push("--force-half-cell".to_string());
    }
    if flags.paused {
        lines.push("--paused".to_string());
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(path) = &flags.debug_log {
        lines.push(format!("--debug-log {}", path.display()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove the saved defaults at `path`, if any.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Extract known flags from a token list. Unknown tokens are ignored.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value)),
            _ => (token, None),
        };
        match name {
            "--no-images" => flags.no_images = true,
            "--force-half-cell" => flags.force_half_cell = true,
            "--paused" => flags.paused = true,
            "--perf" => flags.perf = true,
            "--tick-ms" | "--debounce-ms" | "--avatar-url" | "--seed" | "--debug-log" => {
                let value = match inline_value {
                    Some(value) => Some(value),
                    None => {
                        let next = tokens.get(i + 1).map(String::as_str);
                        if next.is_some() {
                            i += 1;
                        }
                        next
                    }
                };
                if let Some(value) = value {
                    apply_value(&mut flags, name, value);
                }
            }
            _ => {}
        }
        i += 1;
    }
    flags
}

fn apply_value(flags: &mut ConfigFlags, name: &str, value: &str) {
    let rejected = &mut flags.rejected;
    match name {
        "--tick-ms" => flags.tick_ms = parse_number(name, value, rejected),
        "--debounce-ms" => flags.debounce_ms = parse_number(name, value, rejected),
        "--seed" => flags.seed = parse_number(name, value, rejected),
        "--avatar-url" => flags.avatar_url = Some(value.to_string()),
        "--debug-log" => flags.debug_log = Some(PathBuf::from(value)),
        _ => {}
    }
}

fn parse_number(name: &str, value: &str, rejected: &mut Vec<String>) -> Option<u64> {
    match value.parse() {
        Ok(n) => Some(n),
        Err(err) => {
            rejected.push(format!("{name} {value}: {err}"));
            None
        }
    }
}
