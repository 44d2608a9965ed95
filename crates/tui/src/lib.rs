//! # Stockpick TUI
//!
//! A terminal rendition of the supply request form. The form's controls live
//! in an in-memory [`document::FormDocument`] that implements the select
//! widget's host surface, so the same `SearchableSelect` state machine that
//! drives the web form drives the terminal one.
//!
//! ## Key Features
//!
//! - Searchable supply field with live filtering and match emphasis
//! - Category filter, quantity field bounded by the selected supply, return date
//! - Detached popup placed by viewport breakpoints and re-placed after resizes
//! - Mouse support: row picks, outside clicks, the clear button, scroll-to-close

pub mod document;
pub mod form;
pub mod ui;

use anyhow::Result;
use stockpick_util::{Catalog, CategoryRecord, SettingsStore};

pub use form::{FormSubmission, RequestForm};

/// Inputs for one interactive session.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub catalog: Catalog,
    /// Replaces the categories the catalog carries or implies.
    pub categories: Option<Vec<CategoryRecord>>,
    /// Theme id or alias requested on the command line.
    pub theme: Option<String>,
}

/// Runs the request form and returns what the user submitted.
///
/// Returns `Ok(None)` when the form is abandoned (Esc or Ctrl+C).
///
/// # Errors
///
/// Fails when the terminal cannot be prepared or restored, or when the form
/// cannot be wired.
pub async fn run(options: RunOptions, settings: &SettingsStore) -> Result<Option<FormSubmission>> {
    let RunOptions {
        catalog,
        categories,
        theme,
    } = options;
    let current = settings.settings();
    let categories = categories.unwrap_or_else(|| catalog.categories());
    let form = RequestForm::new(&catalog, categories, &current)?;
    let theme = ui::theme::load(theme.as_deref(), current.preferred_theme.as_deref());
    ui::runtime::run_form(form, theme, settings).await
}
