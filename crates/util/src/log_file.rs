//! Log file used while the terminal form owns the screen.

use std::env;
use std::fs::{File, OpenOptions, create_dir_all};
use std::io;
use std::path::{Path, PathBuf};

use dirs_next::config_dir;

use crate::expand_tilde;

/// Environment variable overriding where terminal-session logs are written.
pub const LOG_PATH_ENV: &str = "STOCKPICK_LOG_PATH";

pub fn resolve_log_path() -> PathBuf {
    if let Some(value) = env::var(LOG_PATH_ENV).ok().filter(|value| !value.trim().is_empty()) {
        return expand_tilde(&value);
    }
    let base = config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("stockpick").join("logs").join("tui.log")
}

/// Opens `path` for appending, creating missing parent directories.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
