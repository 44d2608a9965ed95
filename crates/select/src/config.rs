//! Construction options for a searchable select.

use std::time::Duration;

use stockpick_types::ElementId;

use crate::placement::Breakpoints;

/// Element id of the return-date field that the wide layout stretches to.
pub const DEFAULT_WIDE_ANCHOR_ID: &str = "return-date-input";

/// Debounce applied to resize bursts before the popup is re-placed.
pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(100);

/// Identifies the elements one select instance is wired to.
///
/// The search input, popup and hidden value field are mandatory; everything
/// else is optional and silently skipped when absent from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectConfig {
    pub search_input: ElementId,
    pub popup: ElementId,
    pub hidden_input: ElementId,
    pub category_filter: Option<ElementId>,
    pub clear_button: Option<ElementId>,
    /// Field whose `max` and `placeholder` follow the selected row's available quantity.
    pub quantity_field: Option<ElementId>,
    /// Field whose right edge bounds the popup on wide viewports.
    pub wide_anchor: Option<ElementId>,
}

impl SelectConfig {
    pub fn new(search_input: impl Into<ElementId>, popup: impl Into<ElementId>, hidden_input: impl Into<ElementId>) -> Self {
        Self {
            search_input: search_input.into(),
            popup: popup.into(),
            hidden_input: hidden_input.into(),
            category_filter: None,
            clear_button: None,
            quantity_field: None,
            wide_anchor: Some(ElementId::new(DEFAULT_WIDE_ANCHOR_ID)),
        }
    }

    pub fn with_category_filter(mut self, id: impl Into<ElementId>) -> Self {
        self.category_filter = Some(id.into());
        self
    }

    pub fn with_clear_button(mut self, id: impl Into<ElementId>) -> Self {
        self.clear_button = Some(id.into());
        self
    }

    pub fn with_quantity_field(mut self, id: impl Into<ElementId>) -> Self {
        self.quantity_field = Some(id.into());
        self
    }

    /// Overrides (or with `None`, disables) the wide-layout anchor.
    pub fn with_wide_anchor(mut self, id: Option<ElementId>) -> Self {
        self.wide_anchor = id;
        self
    }
}

/// Geometry and timing knobs shared by every instance on a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub breakpoints: Breakpoints,
    pub resize_debounce: Duration,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            breakpoints: Breakpoints::default(),
            resize_debounce: DEFAULT_RESIZE_DEBOUNCE,
        }
    }
}
