/// Interaction state owned by one select instance.
///
/// `highlighted` indexes the currently visible subsequence of rows, never the
/// full option list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub is_open: bool,
    pub highlighted: Option<usize>,
    /// Trimmed, lowercased search term of the last filter pass.
    pub search_term: String,
    pub category_filter: String,
    /// Mirrors the hidden field's value.
    pub selected_value: String,
}

impl SelectionState {
    /// Drops search, category and highlight while keeping the selection.
    pub fn reset_filters(&mut self) {
        self.highlighted = None;
        self.search_term.clear();
        self.category_filter.clear();
    }
}
