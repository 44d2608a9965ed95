//! Utilities shared by the stockpick terminal host and CLI: persisted
//! settings, catalog loading, the session log file and path helpers.

pub mod catalog;
pub mod log_file;
pub mod path_processing;
pub mod settings;

pub use catalog::{Catalog, CatalogError, CategoryRecord, load_catalog, load_categories};
pub use log_file::{LOG_PATH_ENV, open_log_file, resolve_log_path};
pub use path_processing::expand_tilde;
pub use settings::{SETTINGS_PATH_ENV, Settings, SettingsError, SettingsStore};
