//! Settings persistence for the stockpick terminal host.
//!
//! Settings live in a small JSON file under the platform configuration
//! directory (`~/.config/stockpick/settings.json` on most platforms). They
//! carry the popup breakpoints, the resize debounce, the pixel size of a
//! terminal cell, and the preferred theme. A missing file yields defaults; a
//! file that fails to parse is reported with a warning and also yields
//! defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use dirs_next::config_dir;
use serde::{Deserialize, Serialize};
use stockpick_select::{Breakpoints, LayoutOptions};
use thiserror::Error;
use tracing::warn;

use crate::expand_tilde;

/// Environment variable allowing callers to override the settings file path.
pub const SETTINGS_PATH_ENV: &str = "STOCKPICK_SETTINGS_PATH";

pub const SETTINGS_FILE_NAME: &str = "settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persisted settings values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub breakpoints: Breakpoints,
    pub resize_debounce_ms: u64,
    /// Pixel width of one terminal column.
    pub cell_width: f32,
    /// Pixel height of one terminal row.
    pub cell_height: f32,
    /// Canonical identifier of the theme chosen in the terminal host.
    pub preferred_theme: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            breakpoints: Breakpoints::default(),
            resize_debounce_ms: 100,
            cell_width: 8.0,
            cell_height: 16.0,
            preferred_theme: None,
        }
    }
}

impl Settings {
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            breakpoints: self.breakpoints,
            resize_debounce: Duration::from_millis(self.resize_debounce_ms),
        }
    }
}

/// Settings shared across the session, written back when a preference changes.
#[derive(Debug, Default)]
pub struct SettingsStore {
    /// `None` for stores that live only in memory.
    file: Option<PathBuf>,
    current: Mutex<Settings>,
}

impl SettingsStore {
    /// Loads settings from the default location, honoring `STOCKPICK_SETTINGS_PATH`.
    pub fn load() -> Result<Self, SettingsError> {
        Self::at(settings_file())
    }

    pub fn at(file: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let file = file.into();
        let current = read_settings(&file)?;
        Ok(Self {
            file: Some(file),
            current: Mutex::new(current),
        })
    }

    /// In-memory store used when the configuration directory cannot be read.
    pub fn ephemeral() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn settings(&self) -> Settings {
        self.lock().clone()
    }

    pub fn preferred_theme(&self) -> Option<String> {
        self.lock().preferred_theme.clone()
    }

    pub fn set_preferred_theme(&self, theme_id: Option<String>) -> Result<(), SettingsError> {
        self.update(|settings| settings.preferred_theme = theme_id)
    }

    /// Applies `change` and persists the result for file-backed stores.
    pub fn update(&self, change: impl FnOnce(&mut Settings)) -> Result<(), SettingsError> {
        let mut current = self.lock();
        change(&mut current);
        match &self.file {
            Some(file) => write_settings(file, &current),
            None => Ok(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Settings> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn settings_file() -> PathBuf {
    let from_env = env::var(SETTINGS_PATH_ENV).ok().filter(|value| !value.trim().is_empty());
    if let Some(value) = from_env {
        return expand_tilde(&value);
    }
    let base = config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("stockpick").join(SETTINGS_FILE_NAME)
}

fn write_settings(file: &Path, settings: &Settings) -> Result<(), SettingsError> {
    if let Some(directory) = file.parent() {
        fs::create_dir_all(directory)?;
    }
    fs::write(file, serde_json::to_vec_pretty(settings)?)?;
    Ok(())
}

/// A missing file means defaults; unparsable content is logged and also means defaults.
fn read_settings(file: &Path) -> Result<Settings, SettingsError> {
    let contents = match fs::read_to_string(file) {
        Ok(contents) => contents,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(error) => return Err(error.into()),
    };
    Ok(serde_json::from_str(&contents).unwrap_or_else(|error| {
        warn!(file = %file.display(), %error, "settings file unreadable; using defaults");
        Settings::default()
    }))
}
