//! The surface a host document exposes to the widget.
//!
//! A host owns the actual elements (DOM nodes, terminal form fields, or test
//! fakes). The widget reads values and geometry through [`SelectHost`] and
//! pushes its complete popup view model back through
//! [`SelectHost::present_popup`] after every change, so hosts never need to
//! inspect widget internals to render.

use stockpick_types::{Bounds, ElementId, OptionRecord, Viewport};

use crate::filter::LabelSegment;
use crate::placement::Placement;

pub trait SelectHost {
    fn has_element(&self, id: &ElementId) -> bool;

    /// Viewport-relative bounding box of an element.
    fn bounds(&self, id: &ElementId) -> Option<Bounds>;

    fn viewport(&self) -> Viewport;

    /// Current value of a field-like element.
    fn value(&self, id: &ElementId) -> Option<String>;

    fn set_value(&mut self, id: &ElementId, value: &str);

    fn set_attribute(&mut self, id: &ElementId, name: &str, value: &str);

    fn set_visible(&mut self, id: &ElementId, visible: bool);

    fn focus(&mut self, id: &ElementId);

    /// True when `target` is `ancestor` or lies inside it.
    fn contains(&self, ancestor: &ElementId, target: &ElementId) -> bool;

    /// Option rows rendered inside the popup, in document order.
    fn option_rows(&self, popup: &ElementId) -> Vec<OptionRecord>;

    fn present_popup(&mut self, popup: &ElementId, presentation: &PopupPresentation);
}

/// Where the popup currently lives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PopupMount {
    /// Hidden inside its original container.
    Anchored,
    /// Mounted at the document root at a fixed viewport position.
    Detached(Placement),
}

impl PopupMount {
    pub fn is_detached(&self) -> bool {
        matches!(self, PopupMount::Detached(_))
    }

    pub fn placement(&self) -> Option<Placement> {
        match self {
            PopupMount::Detached(placement) => Some(*placement),
            PopupMount::Anchored => None,
        }
    }
}

/// One option row as the host should draw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub value: String,
    pub label: Vec<LabelSegment>,
    pub visible: bool,
    pub highlighted: bool,
    pub placeholder: bool,
}

impl RowView {
    pub fn label_text(&self) -> String {
        self.label.iter().map(|segment| segment.text.as_str()).collect()
    }
}

/// Complete popup view model.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupPresentation {
    pub mount: PopupMount,
    pub rows: Vec<RowView>,
    /// Counter text, e.g. `"3 items found"`.
    pub results_label: String,
    /// Message of the no-results row when it is shown.
    pub no_results: Option<String>,
}

impl PopupPresentation {
    pub fn is_open(&self) -> bool {
        self.mount.is_detached()
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &RowView> {
        self.rows.iter().filter(|row| row.visible)
    }
}
