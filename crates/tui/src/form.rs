//! The supply request form: element document, searchable select and the
//! editing state of each field.
//!
//! Terminal events are translated into [`SelectEvent`]s for the supply
//! search. After each dispatch the form pulls back whatever the widget wrote
//! into the document so the field buffers always show the document's values.

use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use serde::Serialize;
use stockpick_select::{
    Breakpoints, EventOutcome, LayoutTier, PopupPresentation, SearchableSelect, SelectConfig, SelectEvent, SelectHost,
    SelectKey,
};
use stockpick_types::{ElementId, OptionRecord};
use stockpick_util::{Catalog, CategoryRecord, Settings};
use tracing::debug;

use crate::document::{CellMetrics, Element, ElementKind, FormDocument};
use crate::ui::layout::FormLayout;
use crate::ui::text_input::{InputKind, TextInputState};

pub const SUPPLY_SEARCH: &str = "supply-search";
pub const SUPPLY_DROPDOWN: &str = "supply-dropdown";
pub const SUPPLY_ID: &str = "supply-id";
pub const CATEGORY_FILTER: &str = "category-filter";
pub const CLEAR_SEARCH: &str = "clear-search";
pub const QUANTITY_INPUT: &str = "quantity-input";
pub const RETURN_DATE_INPUT: &str = "return-date-input";

/// Rows taken by the popup border and its counter line.
const POPUP_CHROME_ROWS: u16 = 3;

/// Focusable fields in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Search,
    Category,
    Quantity,
    ReturnDate,
}

impl Field {
    const ORDER: [Field; 4] = [Field::Search, Field::Category, Field::Quantity, Field::ReturnDate];

    pub fn element_id(self) -> ElementId {
        ElementId::new(match self {
            Field::Search => SUPPLY_SEARCH,
            Field::Category => CATEGORY_FILTER,
            Field::Quantity => QUANTITY_INPUT,
            Field::ReturnDate => RETURN_DATE_INPUT,
        })
    }

    fn from_element(id: &str) -> Option<Self> {
        Self::ORDER.into_iter().find(|field| field.element_id().as_str() == id)
    }

    fn offset(self, step: isize) -> Self {
        let index = Self::ORDER.iter().position(|field| *field == self).unwrap_or(0) as isize;
        let len = Self::ORDER.len() as isize;
        Self::ORDER[(index + step).rem_euclid(len) as usize]
    }
}

/// What a completed form reports back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSubmission {
    pub value: String,
    pub name: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    Info(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    None,
    Redraw,
    CycleTheme,
    Submit(FormSubmission),
    Quit,
}

impl FormAction {
    fn redraw_if(changed: bool) -> Self {
        if changed { FormAction::Redraw } else { FormAction::None }
    }
}

pub struct RequestForm {
    document: FormDocument,
    select: SearchableSelect,
    breakpoints: Breakpoints,
    options: Vec<OptionRecord>,
    categories: Vec<CategoryRecord>,
    search: TextInputState,
    quantity: TextInputState,
    return_date: TextInputState,
    focus: Field,
    layout: FormLayout,
    popup_hits: Vec<(Rect, String)>,
    status: Option<StatusLine>,
}

impl RequestForm {
    pub fn new(catalog: &Catalog, categories: Vec<CategoryRecord>, settings: &Settings) -> Result<Self> {
        let mut document = FormDocument::new(CellMetrics::new(settings.cell_width, settings.cell_height));
        document.insert(SUPPLY_SEARCH, Element::new(ElementKind::TextField));
        document.insert(CATEGORY_FILTER, Element::new(ElementKind::Select));
        document.insert(QUANTITY_INPUT, Element::new(ElementKind::TextField));
        document.insert(RETURN_DATE_INPUT, Element::new(ElementKind::TextField));
        document.insert(SUPPLY_ID, Element::new(ElementKind::Hidden));
        let mut clear = Element::new(ElementKind::Button).with_parent(SUPPLY_SEARCH);
        clear.visible = false;
        document.insert(CLEAR_SEARCH, clear);
        document.insert(SUPPLY_DROPDOWN, Element::new(ElementKind::Popup));
        let options = catalog.rows();
        document.set_option_rows(SUPPLY_DROPDOWN, options.clone());

        let config = SelectConfig::new(SUPPLY_SEARCH, SUPPLY_DROPDOWN, SUPPLY_ID)
            .with_category_filter(CATEGORY_FILTER)
            .with_clear_button(CLEAR_SEARCH)
            .with_quantity_field(QUANTITY_INPUT)
            .with_wide_anchor(Some(ElementId::new(RETURN_DATE_INPUT)));
        let select = SearchableSelect::try_attach(&mut document, config, settings.layout_options())
            .context("wiring the supply search")?;
        document.focus(&Field::Search.element_id());

        Ok(Self {
            document,
            select,
            breakpoints: settings.breakpoints,
            options,
            categories,
            search: TextInputState::new(InputKind::Text),
            quantity: TextInputState::new(InputKind::Digits),
            return_date: TextInputState::new(InputKind::Text),
            focus: Field::Search,
            layout: FormLayout::default(),
            popup_hits: Vec::new(),
            status: None,
        })
    }

    pub fn document(&self) -> &FormDocument {
        &self.document
    }

    pub fn select(&self) -> &SearchableSelect {
        &self.select
    }

    pub fn layout(&self) -> &FormLayout {
        &self.layout
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    pub fn search_input(&self) -> &TextInputState {
        &self.search
    }

    pub fn quantity_input(&self) -> &TextInputState {
        &self.quantity
    }

    pub fn return_date_input(&self) -> &TextInputState {
        &self.return_date
    }

    pub fn presentation(&self) -> Option<&PopupPresentation> {
        self.document.presentation(&ElementId::new(SUPPLY_DROPDOWN))
    }

    /// Cell rectangle of the popup while it is detached.
    pub fn popup_area(&self) -> Rect {
        self.document.area(&ElementId::new(SUPPLY_DROPDOWN))
    }

    /// Category shown in the filter control; `None` means all categories.
    pub fn active_category(&self) -> Option<&CategoryRecord> {
        let value = self.document.value_of(&ElementId::new(CATEGORY_FILTER));
        self.categories.iter().find(|category| category.id == value)
    }

    pub fn is_clear_visible(&self) -> bool {
        self.document.is_visible(&ElementId::new(CLEAR_SEARCH))
    }

    pub fn quantity_placeholder(&self) -> Option<&str> {
        self.document.attribute(&ElementId::new(QUANTITY_INPUT), "placeholder")
    }

    /// False when the typed quantity exceeds the selected supply's `max`.
    pub fn quantity_within_max(&self) -> bool {
        match (self.quantity.input().parse::<u32>(), self.quantity_max()) {
            (Ok(quantity), Some(max)) => quantity <= max,
            _ => true,
        }
    }

    fn quantity_max(&self) -> Option<u32> {
        self.document
            .attribute(&ElementId::new(QUANTITY_INPUT), "max")
            .and_then(|max| max.trim().parse().ok())
    }

    /// Records where the last frame drew each popup row, for mouse hits.
    pub fn set_popup_hits(&mut self, hits: Vec<(Rect, String)>) {
        self.popup_hits = hits;
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.select.next_deadline()
    }

    /// Runs a pending popup reflow. Returns true when a redraw is due.
    pub fn tick(&mut self, now: Instant) -> bool {
        let moved = self.select.tick(&mut self.document, now);
        if moved {
            self.sync_from_document();
        }
        moved
    }

    /// Lays the form out for `area` without notifying the widget.
    pub fn apply_layout(&mut self, area: Rect) {
        self.document.set_screen(area);
        let stacked = self.breakpoints.tier(self.document.viewport().width) == LayoutTier::Compact;
        self.layout = FormLayout::compute(area, stacked);

        let areas = [
            (SUPPLY_SEARCH, self.layout.search),
            (CLEAR_SEARCH, self.layout.clear),
            (CATEGORY_FILTER, self.layout.category),
            (QUANTITY_INPUT, self.layout.quantity),
            (RETURN_DATE_INPUT, self.layout.return_date),
        ];
        for (id, rect) in areas {
            self.document.set_area(&ElementId::new(id), rect);
        }
    }

    /// Re-lays the form after a terminal resize and forwards the resize to the widget.
    pub fn resize(&mut self, area: Rect, now: Instant) -> bool {
        if area == self.document.screen() {
            return false;
        }
        self.apply_layout(area);
        self.dispatch(SelectEvent::Resized { at: now });
        true
    }

    pub fn handle_event(&mut self, event: Event, now: Instant) -> FormAction {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => FormAction::redraw_if(self.resize(Rect::new(0, 0, width, height), now)),
            _ => FormAction::None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('s') if control => return self.submit(),
            KeyCode::F(2) => return FormAction::CycleTheme,
            KeyCode::Tab => return self.move_focus(1),
            KeyCode::BackTab => return self.move_focus(-1),
            KeyCode::Esc if !(self.focus == Field::Search && self.select.is_open()) => return FormAction::Quit,
            _ => {}
        }
        if control {
            return FormAction::None;
        }

        match self.focus {
            Field::Search => self.handle_search_key(key.code),
            Field::Category => self.handle_category_key(key.code),
            Field::Quantity | Field::ReturnDate => self.handle_plain_key(self.focus, key.code),
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> FormAction {
        match mouse.kind {
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => self.scroll(mouse),
            MouseEventKind::Down(MouseButton::Left) => self.press(mouse.column, mouse.row),
            _ => FormAction::None,
        }
    }

    /// The wheel over the open popup walks its rows; anywhere else it
    /// scrolls the form, which closes the popup.
    fn scroll(&mut self, mouse: MouseEvent) -> FormAction {
        let over_popup = self.select.is_open() && self.popup_area().contains(Position::new(mouse.column, mouse.row));
        let event = match (over_popup, mouse.kind) {
            (true, MouseEventKind::ScrollUp) => SelectEvent::KeyDown(SelectKey::ArrowUp),
            (true, _) => SelectEvent::KeyDown(SelectKey::ArrowDown),
            (false, _) => SelectEvent::Scrolled,
        };
        FormAction::redraw_if(self.dispatch(event).changed)
    }

    fn handle_search_key(&mut self, code: KeyCode) -> FormAction {
        let select_key = match code {
            KeyCode::Down => SelectKey::ArrowDown,
            KeyCode::Up => SelectKey::ArrowUp,
            KeyCode::Enter => SelectKey::Enter,
            KeyCode::Esc => SelectKey::Escape,
            _ => SelectKey::Other,
        };
        if select_key != SelectKey::Other {
            let outcome = self.dispatch(SelectEvent::KeyDown(select_key));
            return FormAction::redraw_if(outcome.changed);
        }

        let mut changed = false;
        let edited = match code {
            KeyCode::Char(character) => {
                changed |= self.open_from_typing();
                self.search.insert_char(character)
            }
            KeyCode::Backspace => {
                changed |= self.open_from_typing();
                self.search.backspace()
            }
            KeyCode::Left => {
                self.search.move_left();
                return FormAction::Redraw;
            }
            KeyCode::Right => {
                self.search.move_right();
                return FormAction::Redraw;
            }
            _ => false,
        };
        if edited {
            let text = self.search.input().to_string();
            self.document.set_value(&Field::Search.element_id(), &text);
            changed |= self.dispatch(SelectEvent::InputChanged).changed;
        }
        FormAction::redraw_if(changed)
    }

    fn handle_plain_key(&mut self, field: Field, code: KeyCode) -> FormAction {
        let buffer = match field {
            Field::Quantity => &mut self.quantity,
            Field::ReturnDate => &mut self.return_date,
            Field::Search | Field::Category => return FormAction::None,
        };
        match edit_field(buffer, code) {
            Some(text) => {
                self.document.set_value(&field.element_id(), &text);
                FormAction::Redraw
            }
            None => FormAction::None,
        }
    }

    fn open_from_typing(&mut self) -> bool {
        !self.select.is_open() && self.dispatch(SelectEvent::InputPressed).changed
    }

    fn handle_category_key(&mut self, code: KeyCode) -> FormAction {
        let step: isize = match code {
            KeyCode::Left => -1,
            KeyCode::Right | KeyCode::Char(' ') => 1,
            _ => return FormAction::None,
        };
        if self.categories.is_empty() {
            return FormAction::None;
        }
        // Position 0 is "all categories".
        let slots = self.categories.len() as isize + 1;
        let current = self
            .active_category()
            .and_then(|active| self.categories.iter().position(|category| category.id == active.id))
            .map_or(0, |index| index as isize + 1);
        let next = (current + step).rem_euclid(slots);
        let value = if next == 0 {
            String::new()
        } else {
            self.categories[next as usize - 1].id.clone()
        };
        self.document.set_value(&ElementId::new(CATEGORY_FILTER), &value);
        self.dispatch(SelectEvent::CategoryChanged);
        FormAction::Redraw
    }

    fn move_focus(&mut self, step: isize) -> FormAction {
        self.set_focus(self.focus.offset(step));
        FormAction::Redraw
    }

    fn set_focus(&mut self, field: Field) {
        if field != Field::Search && self.select.is_open() {
            self.dispatch(SelectEvent::PointerDown {
                target: Some(field.element_id()),
            });
        }
        self.focus = field;
        self.document.focus(&field.element_id());
    }

    fn press(&mut self, column: u16, row: u16) -> FormAction {
        let position = Position::new(column, row);
        if let Some((_, value)) = self.popup_hits.iter().find(|(area, _)| area.contains(position)) {
            let value = value.clone();
            return FormAction::redraw_if(self.dispatch(SelectEvent::OptionPressed { value }).changed);
        }

        let target = self.document.hit_test(column, row);
        let mut changed = self.dispatch(SelectEvent::PointerDown { target: target.clone() }).changed;
        match target.as_ref().map(ElementId::as_str) {
            Some(CLEAR_SEARCH) => {
                changed |= self.dispatch(SelectEvent::ClearPressed).changed;
            }
            Some(SUPPLY_SEARCH) => {
                self.set_focus(Field::Search);
                changed = true;
                changed |= self.dispatch(SelectEvent::InputPressed).changed;
            }
            Some(id) => {
                if let Some(field) = Field::from_element(id) {
                    self.set_focus(field);
                    changed = true;
                }
            }
            None => {}
        }
        FormAction::redraw_if(changed)
    }

    fn dispatch(&mut self, event: SelectEvent) -> EventOutcome {
        let outcome = self.select.handle_event(&mut self.document, event);
        self.sync_from_document();
        outcome
    }

    /// Pulls values the widget wrote back into the field buffers.
    fn sync_from_document(&mut self) {
        let search_value = self.document.value_of(&Field::Search.element_id()).to_string();
        if search_value != self.search.input() {
            self.search.set_input(search_value);
        }
        if self.document.focused() == Some(&Field::Search.element_id()) {
            self.focus = Field::Search;
        }

        let popup_area = match self.presentation().and_then(|presentation| presentation.mount.placement()) {
            Some(placement) => {
                let rows = self.presentation().map_or(0, |presentation| presentation.visible_rows().count().max(1));
                let screen = self.document.screen();
                let area = self
                    .document
                    .cells()
                    .to_cells(placement.left, placement.top, placement.width, screen);
                let wanted = u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(POPUP_CHROME_ROWS);
                Rect { height: area.height.min(wanted), ..area }
            }
            None => Rect::default(),
        };
        self.document.set_area(&ElementId::new(SUPPLY_DROPDOWN), popup_area);
        if popup_area.is_empty() {
            self.popup_hits.clear();
        }
    }

    fn submit(&mut self) -> FormAction {
        match self.validate() {
            Ok(submission) => {
                debug!(value = %submission.value, quantity = submission.quantity, "request submitted");
                FormAction::Submit(submission)
            }
            Err(message) => {
                self.status = Some(StatusLine::Error(message));
                FormAction::Redraw
            }
        }
    }

    fn validate(&self) -> Result<FormSubmission, String> {
        let value = self.document.value_of(&ElementId::new(SUPPLY_ID));
        let Some(option) = self.options.iter().find(|option| !option.is_placeholder() && option.value == value) else {
            return Err("Select a supply first".to_string());
        };

        let quantity = match self.quantity.input().parse::<u32>() {
            Ok(quantity) if quantity > 0 => quantity,
            _ => return Err("Enter a quantity of at least 1".to_string()),
        };
        if let Some(max) = self.quantity_max()
            && quantity > max
        {
            return Err(format!("Only {max} available"));
        }

        let return_date = self.return_date.input().trim();
        Ok(FormSubmission {
            value: option.value.clone(),
            name: option.display_name().to_string(),
            quantity,
            return_date: (!return_date.is_empty()).then(|| return_date.to_string()),
        })
    }

    pub fn set_status(&mut self, status: StatusLine) {
        self.status = Some(status);
    }
}

/// Applies a key to a plain field. Returns the new text when it changed.
fn edit_field(field: &mut TextInputState, code: KeyCode) -> Option<String> {
    let changed = match code {
        KeyCode::Char(character) => field.insert_char(character),
        KeyCode::Backspace => field.backspace(),
        KeyCode::Left => {
            field.move_left();
            true
        }
        KeyCode::Right => {
            field.move_right();
            true
        }
        _ => false,
    };
    changed.then(|| field.input().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn catalog() -> Catalog {
        Catalog::from_yaml_str(
            r#"
placeholder: Select a supply
options:
  - { value: "1", name: Hammer, category: "10", category_name: Hand Tools }
  - { value: "2", name: Hand Saw, category: "10", category_name: Hand Tools, available: 5 }
  - { value: "3", name: Drill, category: "20", category_name: Power Tools, code: DRL-9 }
"#,
        )
        .unwrap()
    }

    fn form(width: u16) -> RequestForm {
        let catalog = catalog();
        let mut form = RequestForm::new(&catalog, catalog.categories(), &Settings::default()).unwrap();
        form.apply_layout(Rect::new(0, 0, width, 40));
        form
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_text(form: &mut RequestForm, text: &str) {
        for character in text.chars() {
            form.handle_key(key(KeyCode::Char(character)));
        }
    }

    fn click(form: &mut RequestForm, column: u16, row: u16) -> FormAction {
        form.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn visible_names(form: &RequestForm) -> Vec<String> {
        form.presentation()
            .unwrap()
            .visible_rows()
            .map(|row| row.label_text())
            .collect()
    }

    #[test]
    fn typing_opens_the_popup_and_filters() {
        let mut form = form(160);
        type_text(&mut form, "dr");

        assert!(form.select().is_open());
        assert_eq!(form.search_input().input(), "dr");
        assert_eq!(visible_names(&form), vec!["Drill"]);
        assert!(form.is_clear_visible());
        assert!(!form.popup_area().is_empty());
        assert_eq!(form.popup_area().y, form.layout().search.bottom());
    }

    #[test]
    fn keyboard_selection_fills_the_form() {
        let mut form = form(160);
        type_text(&mut form, "saw");
        form.handle_key(key(KeyCode::Down));
        form.handle_key(key(KeyCode::Enter));

        assert!(!form.select().is_open());
        assert_eq!(form.search_input().input(), "Hand Saw");
        assert_eq!(form.document().value_of(&ElementId::new(SUPPLY_ID)), "2");
        assert_eq!(form.quantity_placeholder(), Some("Enter quantity (max 5)"));
        assert!(form.popup_area().is_empty());
    }

    #[test]
    fn submit_validates_quantity_against_the_max() {
        let mut form = form(160);
        let control_s = KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char('s'))
        };
        assert_eq!(form.handle_key(control_s), FormAction::Redraw);
        assert_eq!(form.status(), Some(&StatusLine::Error("Select a supply first".into())));

        type_text(&mut form, "saw");
        form.handle_key(key(KeyCode::Down));
        form.handle_key(key(KeyCode::Enter));
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focus(), Field::Quantity);
        type_text(&mut form, "9");
        assert!(!form.quantity_within_max());
        form.handle_key(control_s);
        assert_eq!(form.status(), Some(&StatusLine::Error("Only 5 available".into())));

        form.handle_key(key(KeyCode::Backspace));
        type_text(&mut form, "4x");
        form.handle_key(key(KeyCode::Tab));
        type_text(&mut form, "2026-11-02");
        assert_eq!(
            form.handle_key(control_s),
            FormAction::Submit(FormSubmission {
                value: "2".into(),
                name: "Hand Saw".into(),
                quantity: 4,
                return_date: Some("2026-11-02".into()),
            })
        );
    }

    #[test]
    fn category_cycles_and_filters_the_rows() {
        let mut form = form(160);
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Right));
        form.handle_key(key(KeyCode::Right));
        assert_eq!(form.active_category().map(|category| category.name.as_str()), Some("Power Tools"));
        assert_eq!(visible_names(&form), vec!["Drill"]);

        form.handle_key(key(KeyCode::Right));
        assert!(form.active_category().is_none());
        form.handle_key(key(KeyCode::Left));
        assert_eq!(form.active_category().map(|category| category.id.as_str()), Some("20"));
    }

    #[test]
    fn tabbing_away_closes_the_popup_and_escape_quits_when_closed() {
        let mut form = form(160);
        type_text(&mut form, "h");
        assert!(form.select().is_open());
        form.handle_key(key(KeyCode::Esc));
        assert!(!form.select().is_open());

        type_text(&mut form, "a");
        form.handle_key(key(KeyCode::Tab));
        assert!(!form.select().is_open());
        assert_eq!(form.handle_key(key(KeyCode::Esc)), FormAction::Quit);
    }

    #[test]
    fn mouse_presses_pick_rows_and_close_on_outside_clicks() {
        let mut form = form(160);
        let search = form.layout().search;
        click(&mut form, search.x + 1, search.y + 1);
        assert!(form.select().is_open());

        let popup = form.popup_area();
        form.set_popup_hits(vec![(Rect::new(popup.x + 1, popup.y + 2, popup.width - 2, 1), "3".into())]);
        assert_eq!(click(&mut form, popup.x + 2, popup.y + 2), FormAction::Redraw);
        assert_eq!(form.search_input().input(), "Drill");

        click(&mut form, search.x + 1, search.y + 1);
        assert!(form.select().is_open());
        let hints = form.layout().hints;
        click(&mut form, hints.x, hints.y);
        assert!(!form.select().is_open());
    }

    #[test]
    fn clear_button_empties_search_and_selection() {
        let mut form = form(160);
        type_text(&mut form, "drill");
        form.handle_key(key(KeyCode::Down));
        form.handle_key(key(KeyCode::Enter));
        type_text(&mut form, "x");
        assert!(form.is_clear_visible());

        let clear = form.layout().clear;
        click(&mut form, clear.x, clear.y);
        assert_eq!(form.search_input().input(), "");
        assert_eq!(form.document().value_of(&ElementId::new(SUPPLY_ID)), "");
        assert!(!form.is_clear_visible());
    }

    #[test]
    fn resize_reflows_the_open_popup_after_the_debounce() {
        let mut form = form(160);
        type_text(&mut form, "h");
        let wide = form.popup_area();

        let start = Instant::now();
        form.handle_event(Event::Resize(80, 40), start);
        assert!(form.next_deadline().is_some());
        assert!(!form.tick(start));
        assert!(form.tick(start + std::time::Duration::from_millis(150)));

        let compact = form.popup_area();
        assert_ne!(wide, compact);
        assert_eq!(compact.y, form.layout().search.bottom());
        assert!(compact.right() <= 80);
    }

    fn wheel(form: &mut RequestForm, kind: MouseEventKind, column: u16, row: u16) -> FormAction {
        form.handle_mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn scrolling_closes_the_detached_popup() {
        let mut form = form(160);
        type_text(&mut form, "h");
        assert_eq!(wheel(&mut form, MouseEventKind::ScrollDown, 0, 0), FormAction::Redraw);
        assert!(!form.select().is_open());
    }

    #[test]
    fn wheel_over_the_popup_moves_the_highlight_and_keeps_it_open() {
        let mut form = form(160);
        type_text(&mut form, "h");
        let popup = form.popup_area();
        assert!(!popup.is_empty());

        assert_eq!(wheel(&mut form, MouseEventKind::ScrollDown, popup.x + 2, popup.y + 2), FormAction::Redraw);
        assert!(form.select().is_open());
        assert_eq!(form.select().highlighted_index(), Some(0));

        wheel(&mut form, MouseEventKind::ScrollDown, popup.x + 2, popup.y + 2);
        wheel(&mut form, MouseEventKind::ScrollUp, popup.x + 2, popup.y + 2);
        assert!(form.select().is_open());
        assert_eq!(form.select().highlighted_index(), Some(0));
    }
}
