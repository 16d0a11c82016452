//! Robolist - a live-updating, searchable robot list in the terminal.
//!
//! # Usage
//!
//! ```bash
//! robolist
//! robolist --tick-ms 500 --debounce-ms 300
//! robolist --no-images --seed 42
//! ```

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use robolist::app::App;
use robolist::config::{
    ConfigFlags, DEFAULT_DEBOUNCE_MS, DEFAULT_TICK_MS, clear_config_flags, global_config_path,
    load_config_flags, local_override_path, parse_flag_tokens, save_config_flags,
};
use robolist::perf;

/// A live-updating, searchable list of robots
#[derive(Parser, Debug)]
#[command(name = "robolist", version, about, long_about = None)]
struct Cli {
    /// Milliseconds between insertions
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_TICK_MS)]
    tick_ms: u64,

    /// Quiet period before a search edit takes effect
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_DEBOUNCE_MS)]
    debounce_ms: u64,

    /// Base URL of the avatar service
    #[arg(long, value_name = "URL")]
    avatar_url: Option<String>,

    /// Seed the entry generator for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Disable avatar fetching and rendering
    #[arg(long)]
    no_images: bool,

    /// Force avatars to use half-cell fallback mode
    #[arg(long)]
    force_half_cell: bool,

    /// Start with insertion paused
    #[arg(long)]
    paused: bool,

    /// Log timing of startup and rendering
    #[arg(long)]
    perf: bool,

    /// Write debug-level logs to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

/// Filter for the log subscriber: WARN by default, DEBUG with a log file,
/// plus perf reports when timing is enabled.
fn log_filter(debug: bool, perf_enabled: bool) -> Result<EnvFilter> {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let mut filter = EnvFilter::from_default_env().add_directive(level.into());
    if perf_enabled {
        let directive = format!("{}=info", perf::TARGET)
            .parse()
            .context("Invalid perf log directive")?;
        filter = filter.add_directive(directive);
    }
    Ok(filter)
}

fn init_logging(debug_log: Option<&Path>, perf_enabled: bool) -> Result<()> {
    let filter = log_filter(debug_log.is_some(), perf_enabled)?;
    match debug_log {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open debug log {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

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

    init_logging(effective.debug_log.as_deref(), effective.perf)?;
    perf::set_enabled(effective.perf);
    for rejected in &effective.rejected {
        tracing::warn!(flag = %rejected, "ignoring invalid flag value");
    }
    tracing::debug!(?effective, config = %global_path.display(), "effective flags");

    let mut app = App::new()
        .with_tick_ms(effective.tick_interval_ms())
        .with_debounce_ms(effective.debounce_window_ms())
        .with_avatar_base_url(effective.avatar_base_url())
        .with_images_enabled(!effective.no_images)
        .with_force_half_cell(effective.force_half_cell)
        .with_paused(effective.paused)
        .with_seed(effective.seed);

    app.run().context("Application error")
}
