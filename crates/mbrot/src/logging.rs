#![forbid(unsafe_code)]

//! Subscriber setup. Stdout belongs to the terminal surface, so logs only
//! go to a file, and only when one was asked for.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding `EnvFilter` directives.
pub const LOG_FILTER_ENV: &str = "MBROT_LOG";

/// Filter from `MBROT_LOG`, falling back to `info`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

fn open_log(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber writing to `path`. `None` leaves logging
/// off entirely.
///
/// # Errors
///
/// Fails if the log file cannot be opened or a global subscriber is already
/// installed.
pub fn init(path: Option<&Path>, json: bool) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let writer = Mutex::new(open_log(path)?);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(io::Error::other)?;
    tracing::info!(path = %path.display(), json, "logging initialized");
    Ok(())
}
