use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use stockpick_select::filter;
use stockpick_tui::RunOptions;
use stockpick_types::OptionRecord;
use stockpick_util::{
    Catalog, SettingsStore, expand_tilde, load_catalog, load_categories, open_log_file, resolve_log_path,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "stockpick", version, about = "Pick supplies from a catalog with a searchable select")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the request form and print the submitted selection as JSON.
    Pick {
        /// Catalog file (.json, .yaml or .yml).
        #[arg(long)]
        catalog: String,
        /// Category list replacing the catalog's own.
        #[arg(long)]
        categories: Option<String>,
        /// Theme id or alias (dracula, nord).
        #[arg(long)]
        theme: Option<String>,
    },
    /// Print the rows a search term leaves visible, without a terminal UI.
    Filter {
        #[arg(long)]
        catalog: String,
        /// Category id constraining the results.
        #[arg(long)]
        category: Option<String>,
        term: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(matches!(cli.command, Command::Pick { .. }));
    match cli.command {
        Command::Pick {
            catalog,
            categories,
            theme,
        } => pick(&catalog, categories.as_deref(), theme).await,
        Command::Filter { catalog, category, term } => {
            let catalog = read_catalog(&catalog)?;
            let report = filter_catalog(&catalog, &term, category.as_deref().unwrap_or_default());
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

/// Logs go to stderr, except while the form owns the terminal: then they are
/// appended to the session log file, or dropped if it cannot be opened.
fn init_tracing(terminal_session: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if !terminal_session {
        let _ = builder.with_writer(std::io::stderr).try_init();
        return;
    }
    match open_log_file(&resolve_log_path()) {
        Ok(file) => {
            let _ = builder.with_ansi(false).with_writer(Mutex::new(file)).try_init();
        }
        Err(_) => {
            let _ = builder.with_writer(std::io::sink).try_init();
        }
    }
}

fn read_catalog(path: &str) -> Result<Catalog> {
    let path = expand_tilde(path);
    load_catalog(&path).with_context(|| format!("loading catalog {}", path.display()))
}

async fn pick(catalog: &str, categories: Option<&str>, theme: Option<String>) -> Result<()> {
    let catalog = read_catalog(catalog)?;
    let categories = match categories {
        Some(path) => {
            let path = expand_tilde(path);
            Some(load_categories(&path).with_context(|| format!("loading categories {}", path.display()))?)
        }
        None => None,
    };
    let settings = SettingsStore::load().unwrap_or_else(|error| {
        warn!(%error, "settings unavailable; using defaults");
        SettingsStore::ephemeral()
    });

    let options = RunOptions {
        catalog,
        categories,
        theme,
    };
    if let Some(submission) = stockpick_tui::run(options, &settings).await? {
        println!("{}", serde_json::to_string_pretty(&submission)?);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct FilterReport<'a> {
    results: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    options: Vec<&'a OptionRecord>,
}

/// Applies the select's matching rules to a catalog.
fn filter_catalog<'a>(catalog: &'a Catalog, raw_term: &str, category: &str) -> FilterReport<'a> {
    let term = filter::normalize_term(raw_term);
    let options: Vec<&OptionRecord> = catalog
        .options
        .iter()
        .filter(|option| filter::is_row_visible(option, &term, category))
        .collect();
    FilterReport {
        results: filter::results_label(options.len()),
        message: filter::no_results_message(options.len(), raw_term, &term, category),
        options,
    }
}
