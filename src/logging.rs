// File: src/logging.rs
// Logger setup. The CLI logs to stderr; the TUI owns the terminal, so it logs
// to a file in the data directory instead.
use crate::context::AppContext;
use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode, WriteLogger};
use std::fs::OpenOptions;

pub const LOG_ENV: &str = "MALASONG_LOG";

/// `MALASONG_LOG` wins over the configured level when it names a valid level.
pub fn effective_level(configured: LevelFilter) -> LevelFilter {
    std::env::var(LOG_ENV)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(configured)
}

fn log_config() -> simplelog::Config {
    ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build()
}

pub fn init_stderr(level: LevelFilter) {
    // A second init (tests, embedding) is harmless; keep the first logger.
    let _ = TermLogger::init(
        effective_level(level),
        log_config(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

pub fn init_file(ctx: &dyn AppContext, level: LevelFilter) -> Result<()> {
    let path = ctx
        .get_log_file_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine log file location"))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file '{}'", path.display()))?;
    let _ = WriteLogger::init(effective_level(level), log_config(), file);
    Ok(())
}
