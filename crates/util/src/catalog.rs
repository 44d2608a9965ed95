//! Loading option catalogs from JSON or YAML files.
//!
//! A catalog is either a bare list of option rows or a document with an
//! optional placeholder label, a category list, and the rows:
//!
//! ```yaml
//! placeholder: Select a supply
//! categories:
//!   - { id: "10", name: Hand Tools }
//! options:
//!   - { value: "1", name: Hammer, category: "10", category_name: Hand Tools, available: 12 }
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use stockpick_types::OptionRecord;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported catalog format '{0}' (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),
    #[error("option value '{0}' appears more than once")]
    DuplicateValue(String),
}

/// Category offered by the category filter control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub categories: Vec<CategoryRecord>,
    #[serde(default)]
    pub options: Vec<OptionRecord>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Rows(Vec<OptionRecord>),
    Full(Catalog),
}

impl From<CatalogDocument> for Catalog {
    fn from(document: CatalogDocument) -> Self {
        match document {
            CatalogDocument::Rows(options) => Catalog {
                options,
                ..Catalog::default()
            },
            CatalogDocument::Full(catalog) => catalog,
        }
    }
}

impl Catalog {
    pub fn from_json_str(input: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(input)?;
        Self::from(document).validated()
    }

    pub fn from_yaml_str(input: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_yaml::from_str(input)?;
        Self::from(document).validated()
    }

    /// Rows in the order the popup shows them, placeholder first when configured.
    pub fn rows(&self) -> Vec<OptionRecord> {
        let mut rows = Vec::with_capacity(self.options.len() + 1);
        if let Some(label) = &self.placeholder
            && !self.options.iter().any(OptionRecord::is_placeholder)
        {
            rows.push(OptionRecord::placeholder(label.clone()));
        }
        rows.extend(self.options.iter().cloned());
        rows
    }

    /// Categories listed explicitly, or derived from the rows when none are.
    pub fn categories(&self) -> Vec<CategoryRecord> {
        if !self.categories.is_empty() {
            return self.categories.clone();
        }
        let mut seen = HashSet::new();
        self.options
            .iter()
            .filter_map(|option| {
                let id = option.category.clone()?;
                if !seen.insert(id.clone()) {
                    return None;
                }
                let name = option.category_name.clone().unwrap_or_else(|| id.clone());
                Some(CategoryRecord { id, name })
            })
            .collect()
    }

    fn validated(self) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for option in &self.options {
            if !seen.insert(option.value.as_str()) {
                return Err(CatalogError::DuplicateValue(option.value.clone()));
            }
        }
        Ok(self)
    }
}

/// Reads a catalog, choosing the parser from the file extension.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let document: CatalogDocument = read_document(path)?;
    let catalog = Catalog::from(document).validated()?;
    debug!(path = %path.display(), options = catalog.options.len(), "catalog loaded");
    Ok(catalog)
}

/// Reads a standalone list of categories, replacing the ones a catalog carries.
pub fn load_categories(path: &Path) -> Result<Vec<CategoryRecord>, CatalogError> {
    let categories: Vec<CategoryRecord> = read_document(path)?;
    debug!(path = %path.display(), categories = categories.len(), "categories loaded");
    Ok(categories)
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let input = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match extension.as_str() {
        "json" => Ok(serde_json::from_str(&input)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(&input)?),
        other => Err(CatalogError::UnsupportedFormat(other.to_string())),
    }
}
