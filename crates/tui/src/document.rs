//! In-memory element document backing the terminal form.
//!
//! Every form control is an entry keyed by its [`ElementId`] with the cell
//! rectangle it occupies in the last layout. The document is what the select
//! widget talks to through [`SelectHost`]; rectangles are scaled into pixel
//! units with the configured cell metrics so breakpoints mean the same thing
//! as in a browser.

use indexmap::IndexMap;
use ratatui::layout::{Position, Rect};
use stockpick_select::{PopupPresentation, SelectHost};
use stockpick_types::{Bounds, ElementId, OptionRecord, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    TextField,
    Select,
    Hidden,
    Button,
    Popup,
}

impl ElementKind {
    /// Only editable controls take keyboard focus.
    pub fn is_focusable(self) -> bool {
        matches!(self, ElementKind::TextField | ElementKind::Select)
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    pub kind: ElementKind,
    pub area: Rect,
    pub value: String,
    pub attributes: IndexMap<String, String>,
    pub visible: bool,
    pub parent: Option<ElementId>,
}

impl Element {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            area: Rect::default(),
            value: String::new(),
            attributes: IndexMap::new(),
            visible: kind != ElementKind::Hidden,
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<ElementId>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

/// Pixel size of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub width: f32,
    pub height: f32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self { width: 8.0, height: 16.0 }
    }
}

impl CellMetrics {
    pub fn new(width: f32, height: f32) -> Self {
        let sanitize = |value: f32, fallback: f32| if value.is_finite() && value > 0.0 { value } else { fallback };
        let default = Self::default();
        Self {
            width: sanitize(width, default.width),
            height: sanitize(height, default.height),
        }
    }

    pub fn to_bounds(&self, area: Rect) -> Bounds {
        Bounds::new(
            f32::from(area.x) * self.width,
            f32::from(area.y) * self.height,
            f32::from(area.width) * self.width,
            f32::from(area.height) * self.height,
        )
    }

    /// Inverse of [`CellMetrics::to_bounds`], rounded to whole cells and clipped to `screen`.
    pub fn to_cells(&self, left: f32, top: f32, width: f32, screen: Rect) -> Rect {
        let to_cell = |pixels: f32, size: f32| (pixels / size).round().clamp(0.0, f32::from(u16::MAX)) as u16;
        let x = to_cell(left, self.width).min(screen.right().saturating_sub(1));
        let y = to_cell(top, self.height).min(screen.bottom());
        let width = to_cell(width, self.width).min(screen.right().saturating_sub(x));
        Rect::new(x, y, width, screen.bottom().saturating_sub(y))
    }
}

#[derive(Debug, Default)]
pub struct FormDocument {
    elements: IndexMap<ElementId, Element>,
    option_rows: IndexMap<ElementId, Vec<OptionRecord>>,
    screen: Rect,
    cells: CellMetrics,
    focused: Option<ElementId>,
    presentations: IndexMap<ElementId, PopupPresentation>,
}

impl FormDocument {
    pub fn new(cells: CellMetrics) -> Self {
        Self {
            cells,
            ..Self::default()
        }
    }

    pub fn insert(&mut self, id: impl Into<ElementId>, element: Element) {
        self.elements.insert(id.into(), element);
    }

    /// Rows a popup element carries, in display order.
    pub fn set_option_rows(&mut self, popup: impl Into<ElementId>, rows: Vec<OptionRecord>) {
        self.option_rows.insert(popup.into(), rows);
    }

    pub fn value_of(&self, id: &ElementId) -> &str {
        self.elements.get(id).map(|element| element.value.as_str()).unwrap_or_default()
    }

    pub fn attribute(&self, id: &ElementId, name: &str) -> Option<&str> {
        self.elements.get(id)?.attributes.get(name).map(String::as_str)
    }

    pub fn is_visible(&self, id: &ElementId) -> bool {
        self.elements.get(id).is_some_and(|element| element.visible)
    }

    pub fn area(&self, id: &ElementId) -> Rect {
        self.elements.get(id).map(|element| element.area).unwrap_or_default()
    }

    pub fn set_area(&mut self, id: &ElementId, area: Rect) {
        if let Some(element) = self.elements.get_mut(id) {
            element.area = area;
        }
    }

    pub fn screen(&self) -> Rect {
        self.screen
    }

    pub fn set_screen(&mut self, screen: Rect) {
        self.screen = screen;
    }

    pub fn cells(&self) -> CellMetrics {
        self.cells
    }

    pub fn focused(&self) -> Option<&ElementId> {
        self.focused.as_ref()
    }

    pub fn presentation(&self, popup: &ElementId) -> Option<&PopupPresentation> {
        self.presentations.get(popup)
    }

    /// Topmost visible element under a cell. Later insertions sit on top.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<ElementId> {
        let position = Position::new(column, row);
        self.elements
            .iter()
            .rev()
            .find(|(_, element)| element.visible && element.area.contains(position))
            .map(|(id, _)| id.clone())
    }
}

impl SelectHost for FormDocument {
    fn has_element(&self, id: &ElementId) -> bool {
        self.elements.contains_key(id)
    }

    fn bounds(&self, id: &ElementId) -> Option<Bounds> {
        self.elements.get(id).map(|element| self.cells.to_bounds(element.area))
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(
            f32::from(self.screen.width) * self.cells.width,
            f32::from(self.screen.height) * self.cells.height,
        )
    }

    fn value(&self, id: &ElementId) -> Option<String> {
        self.elements.get(id).map(|element| element.value.clone())
    }

    fn set_value(&mut self, id: &ElementId, value: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.value = value.to_string();
        }
    }

    fn set_attribute(&mut self, id: &ElementId, name: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn set_visible(&mut self, id: &ElementId, visible: bool) {
        if let Some(element) = self.elements.get_mut(id) {
            element.visible = visible;
        }
    }

    fn focus(&mut self, id: &ElementId) {
        if self.elements.get(id).is_some_and(|element| element.kind.is_focusable()) {
            self.focused = Some(id.clone());
        }
    }

    fn contains(&self, ancestor: &ElementId, target: &ElementId) -> bool {
        let mut current = Some(target);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.elements.get(id).and_then(|element| element.parent.as_ref());
        }
        false
    }

    fn option_rows(&self, popup: &ElementId) -> Vec<OptionRecord> {
        self.option_rows.get(popup).cloned().unwrap_or_default()
    }

    fn present_popup(&mut self, popup: &ElementId, presentation: &PopupPresentation) {
        if let Some(element) = self.elements.get_mut(popup) {
            element.visible = presentation.is_open();
        }
        self.presentations.insert(popup.clone(), presentation.clone());
    }
}
