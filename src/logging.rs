//! Diagnostic logging
//!
//! Logging is off unless `COMMET_LOG` holds a filter directive (for example
//! `COMMET_LOG=debug`). Output goes to a file in the cache directory because
//! the terminal belongs to the UI.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive
pub const LOG_ENV: &str = "COMMET_LOG";

/// Install the subscriber when logging is requested. Returns the log file
/// path when logging was enabled.
pub fn init() -> Result<Option<PathBuf>> {
    let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) else {
        return Ok(None);
    };

    let dir = ProjectDirs::from("", "", "commet")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(std::env::temp_dir);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let path = dir.join("commet.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))?;

    Ok(Some(path))
}
