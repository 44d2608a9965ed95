//! Row matching and match emphasis.
//!
//! A row matches a search term when any of its searchable fields (name,
//! description, number, code, category name) contains the term, compared
//! case-insensitively. Terms are literal text: characters such as `(` or `*`
//! carry no pattern meaning.

use regex::RegexBuilder;
use stockpick_types::OptionRecord;

/// A run of label text, emphasized when it matched the search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSegment {
    pub text: String,
    pub emphasized: bool,
}

impl LabelSegment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: false,
        }
    }

    pub fn emphasized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: true,
        }
    }
}

/// Canonical form of the search input used for matching.
pub fn normalize_term(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn searchable_fields(record: &OptionRecord) -> [Option<&str>; 5] {
    [
        record.name.as_deref(),
        record.description.as_deref(),
        record.number.as_deref(),
        record.code.as_deref(),
        record.category_name.as_deref(),
    ]
}

/// `term` must already be normalized.
pub fn matches_term(record: &OptionRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    searchable_fields(record)
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(term))
}

pub fn matches_category(record: &OptionRecord, category: &str) -> bool {
    category.is_empty() || record.category.as_deref() == Some(category)
}

/// Full visibility rule applied on every filter pass.
pub fn is_row_visible(record: &OptionRecord, term: &str, category: &str) -> bool {
    !record.is_placeholder() && matches_term(record, term) && matches_category(record, category)
}

/// Splits `label` into segments, emphasizing every case-insensitive
/// occurrence of `term`.
pub fn emphasize(label: &str, term: &str) -> Vec<LabelSegment> {
    if term.is_empty() || label.is_empty() {
        return vec![LabelSegment::plain(label)];
    }
    let Ok(pattern) = RegexBuilder::new(&regex::escape(term)).case_insensitive(true).build() else {
        return vec![LabelSegment::plain(label)];
    };

    let mut segments = Vec::new();
    let mut cursor = 0;
    for found in pattern.find_iter(label) {
        if found.start() > cursor {
            segments.push(LabelSegment::plain(&label[cursor..found.start()]));
        }
        segments.push(LabelSegment::emphasized(found.as_str()));
        cursor = found.end();
    }
    if cursor < label.len() {
        segments.push(LabelSegment::plain(&label[cursor..]));
    }
    segments
}

/// Counter text shown above the rows.
pub fn results_label(count: usize) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} item{suffix} found")
}

/// Message for the no-results row, or `None` when it stays hidden.
pub fn no_results_message(visible_count: usize, raw_input: &str, term: &str, category: &str) -> Option<String> {
    if visible_count > 0 {
        return None;
    }
    if !term.is_empty() {
        Some(format!("No items found for \"{raw_input}\""))
    } else if !category.is_empty() {
        Some("No items in this category".to_string())
    } else {
        None
    }
}
