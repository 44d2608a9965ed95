use stockpick_types::ElementId;
use thiserror::Error;

/// Reasons a select declines to wire itself to a host.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    /// One of the mandatory elements (search input, popup, hidden value) is absent.
    #[error("searchable select not initialized: missing elements for {search_input} ({missing:?})")]
    MissingElements { search_input: ElementId, missing: Vec<ElementId> },
}
