use std::collections::HashMap;
use std::time::{Duration, Instant};

use stockpick_select::{
    LayoutTier, PopupMount, PopupPresentation, SearchableSelect, SelectConfig, SelectEvent, SelectHost, SelectKey,
};
use stockpick_types::{Bounds, ElementId, OptionRecord, Viewport};

#[derive(Default)]
struct FakeElement {
    value: String,
    attributes: HashMap<String, String>,
    bounds: Bounds,
    visible: bool,
    parent: Option<ElementId>,
}

/// Minimal in-memory document standing in for a page.
struct FakeDocument {
    elements: HashMap<ElementId, FakeElement>,
    rows: Vec<OptionRecord>,
    viewport: Viewport,
    focused: Option<ElementId>,
    presented: Option<PopupPresentation>,
    presentations: usize,
}

impl FakeDocument {
    fn supply_form(rows: Vec<OptionRecord>) -> Self {
        let mut document = Self {
            elements: HashMap::new(),
            rows,
            viewport: Viewport::new(1280.0, 800.0),
            focused: None,
            presented: None,
            presentations: 0,
        };
        document.insert("supply-search", Bounds::new(40.0, 100.0, 300.0, 36.0));
        document.insert("supply-dropdown", Bounds::default());
        document.insert("supply-id", Bounds::default());
        document.insert("category-filter", Bounds::default());
        document.insert("clear-search", Bounds::default());
        document.insert("quantity-input", Bounds::new(360.0, 100.0, 120.0, 36.0));
        document.insert_child("row-2", "supply-dropdown");
        document.insert("page-body", Bounds::default());
        document
    }

    fn insert(&mut self, id: &str, bounds: Bounds) {
        self.elements.insert(
            ElementId::new(id),
            FakeElement {
                bounds,
                visible: true,
                ..Default::default()
            },
        );
    }

    fn insert_child(&mut self, id: &str, parent: &str) {
        self.elements.insert(
            ElementId::new(id),
            FakeElement {
                parent: Some(ElementId::new(parent)),
                ..Default::default()
            },
        );
    }

    fn type_text(&mut self, text: &str) {
        self.elements.get_mut(&ElementId::new("supply-search")).unwrap().value = text.to_string();
    }

    fn field(&self, id: &str) -> &FakeElement {
        &self.elements[&ElementId::new(id)]
    }

    fn presented(&self) -> &PopupPresentation {
        self.presented.as_ref().expect("popup presented")
    }

    fn visible_labels(&self) -> Vec<String> {
        self.presented().visible_rows().map(|row| row.label_text()).collect()
    }
}

impl SelectHost for FakeDocument {
    fn has_element(&self, id: &ElementId) -> bool {
        self.elements.contains_key(id)
    }

    fn bounds(&self, id: &ElementId) -> Option<Bounds> {
        self.elements.get(id).map(|element| element.bounds)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
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
        self.focused = Some(id.clone());
    }

    fn contains(&self, ancestor: &ElementId, target: &ElementId) -> bool {
        let mut current = Some(target.clone());
        while let Some(id) = current {
            if &id == ancestor {
                return true;
            }
            current = self.elements.get(&id).and_then(|element| element.parent.clone());
        }
        false
    }

    fn option_rows(&self, _popup: &ElementId) -> Vec<OptionRecord> {
        self.rows.clone()
    }

    fn present_popup(&mut self, _popup: &ElementId, presentation: &PopupPresentation) {
        self.presented = Some(presentation.clone());
        self.presentations += 1;
    }
}

fn tool_rows() -> Vec<OptionRecord> {
    vec![
        OptionRecord::placeholder("Select a supply"),
        OptionRecord::new("1", "Hammer").with_category("10", "Hand Tools"),
        OptionRecord::new("2", "Hand Saw").with_category("10", "Hand Tools").with_available("5"),
        OptionRecord::new("3", "Drill")
            .with_category("20", "Power Tools")
            .with_code("DRL-9"),
    ]
}

fn config() -> SelectConfig {
    SelectConfig::new("supply-search", "supply-dropdown", "supply-id")
        .with_category_filter("category-filter")
        .with_clear_button("clear-search")
        .with_quantity_field("quantity-input")
}

fn attached() -> (FakeDocument, SearchableSelect) {
    let mut document = FakeDocument::supply_form(tool_rows());
    let select = SearchableSelect::attach(&mut document, config()).expect("attached");
    (document, select)
}

#[test]
fn missing_mandatory_element_declines_to_attach() {
    let mut document = FakeDocument::supply_form(tool_rows());
    document.elements.remove(&ElementId::new("supply-id"));
    assert!(SearchableSelect::attach(&mut document, config()).is_none());
    assert_eq!(document.presentations, 0);
}

#[test]
fn optional_elements_may_be_absent() {
    let mut document = FakeDocument::supply_form(tool_rows());
    let config = SelectConfig::new("supply-search", "supply-dropdown", "supply-id").with_quantity_field("missing-qty");
    let mut select = SearchableSelect::attach(&mut document, config).expect("attached");
    select.select(&mut document, "2");
    assert_eq!(document.field("supply-id").value, "2");
}

#[test]
fn typing_filters_case_insensitively() {
    let (mut document, mut select) = attached();
    select.handle_event(&mut document, SelectEvent::InputPressed);
    document.type_text("han");
    select.handle_event(&mut document, SelectEvent::InputChanged);

    assert_eq!(select.visible_values(), vec!["1", "2"]);
    assert_eq!(document.visible_labels(), vec!["Hammer", "Hand Saw"]);
    assert_eq!(document.presented().results_label, "2 items found");
    assert!(document.field("clear-search").visible);
}

#[test]
fn matches_search_across_code_and_category_name() {
    let (mut document, mut select) = attached();
    document.type_text("drl");
    select.filter(&mut document);
    assert_eq!(select.visible_values(), vec!["3"]);

    document.type_text("POWER");
    select.filter(&mut document);
    assert_eq!(select.visible_values(), vec!["3"]);
}

#[test]
fn unmatched_term_shows_no_results_row_with_literal_text() {
    let (mut document, mut select) = attached();
    document.type_text("xyz");
    select.filter(&mut document);

    assert!(select.visible_values().is_empty());
    let message = document.presented().no_results.clone().expect("no results shown");
    assert!(message.contains("xyz"), "message: {message}");
    assert_eq!(document.presented().results_label, "0 items found");
}

#[test]
fn category_filter_intersects_with_search() {
    let (mut document, mut select) = attached();
    document.set_value(&ElementId::new("category-filter"), "10");
    select.handle_event(&mut document, SelectEvent::CategoryChanged);
    assert_eq!(select.visible_values(), vec!["1", "2"]);

    document.type_text("saw");
    select.handle_event(&mut document, SelectEvent::InputChanged);
    assert_eq!(select.visible_values(), vec!["2"]);

    document.set_value(&ElementId::new("category-filter"), "99");
    document.type_text("");
    select.handle_event(&mut document, SelectEvent::CategoryChanged);
    assert_eq!(document.presented().no_results.as_deref(), Some("No items in this category"));
}

#[test]
fn matching_text_is_emphasized_and_reverts_when_cleared() {
    let (mut document, mut select) = attached();
    document.type_text("ham");
    select.filter(&mut document);
    let hammer = document.presented().rows.iter().find(|row| row.value == "1").unwrap();
    assert!(hammer.label[0].emphasized);
    assert_eq!(hammer.label[0].text, "Ham");

    document.type_text("");
    select.filter(&mut document);
    let hammer = document.presented().rows.iter().find(|row| row.value == "1").unwrap();
    assert!(hammer.label.iter().all(|segment| !segment.emphasized));
}

#[test]
fn selecting_writes_fields_and_closes() {
    let (mut document, mut select) = attached();
    select.open(&mut document);
    document.type_text("saw");
    select.filter(&mut document);
    select.handle_event(&mut document, SelectEvent::OptionPressed { value: "2".into() });

    assert_eq!(document.field("supply-id").value, "2");
    assert_eq!(document.field("supply-search").value, "Hand Saw");
    assert_eq!(select.state().selected_value, "2");
    assert!(!select.is_open());
    assert_eq!(select.mount(), PopupMount::Anchored);

    let quantity = document.field("quantity-input");
    assert_eq!(quantity.attributes.get("max").map(String::as_str), Some("5"));
    assert_eq!(
        quantity.attributes.get("placeholder").map(String::as_str),
        Some("Enter quantity (max 5)")
    );
    assert!(!document.field("clear-search").visible);
}

#[test]
fn reopening_after_selection_shows_full_list() {
    let (mut document, mut select) = attached();
    document.set_value(&ElementId::new("category-filter"), "20");
    document.type_text("dr");
    select.filter(&mut document);
    select.select(&mut document, "3");

    assert_eq!(document.field("category-filter").value, "");
    select.open(&mut document);
    assert_eq!(select.visible_values(), vec!["", "1", "2", "3"]);
    assert!(select.state().search_term.is_empty());
    assert!(select.state().category_filter.is_empty());
    assert!(document.presented().no_results.is_none());
    assert_eq!(document.presented().results_label, "3 items found");
}

#[test]
fn arrow_down_clamps_to_last_visible_row() {
    let (mut document, mut select) = attached();
    document.type_text("han");
    select.filter(&mut document);

    let outcome = select.handle_event(&mut document, SelectEvent::KeyDown(SelectKey::ArrowDown));
    assert!(outcome.prevent_default);
    assert!(select.is_open(), "first arrow only opens");
    assert_eq!(select.highlighted_index(), None);

    for pressed in 1..=5usize {
        select.handle_event(&mut document, SelectEvent::KeyDown(SelectKey::ArrowDown));
        assert_eq!(select.highlighted_index(), Some((pressed - 1).min(1)));
    }
    assert_eq!(select.highlighted_value(), Some("2"));

    for _ in 0..4 {
        select.handle_event(&mut document, SelectEvent::KeyDown(SelectKey::ArrowUp));
    }
    assert_eq!(select.highlighted_index(), Some(0));
}

#[test]
fn arrows_do_nothing_when_no_rows_are_visible() {
    let (mut document, mut select) = attached();
    select.open(&mut document);
    document.type_text("xyz");
    select.filter(&mut document);
    select.handle_event(&mut document, SelectEvent::KeyDown(SelectKey::ArrowDown));
    assert_eq!(select.highlighted_index(), None);
    let outcome = select.handle_event(&mut document, SelectEvent::KeyDown(SelectKey::Enter));
    assert!(outcome.prevent_default);
    assert_eq!(document.field("supply-id").value, "");
}

#[test]
fn filtering_resets_highlight() {
    let (mut document, mut select) = attached();
    select.open(&mut document);
    select.handle_event(&mut document, SelectEvent::KeyDown(SelectKey::ArrowDown));
    assert_eq!(select.highlighted_index(), Some(0));
    document.type_text("d");
    select.handle_event(&mut document, SelectEvent::InputChanged);
    assert_eq!(select.highlighted_index(), None);
}

#[test]
fn enter_selects_highlighted_row() {
    let (mut document, mut select) = attached();
    select.open(&mut document);
    document.type_text("drill");
    select.filter(&mut document);
    select.handle_event(&mut document, SelectEvent::KeyDown(SelectKey::ArrowDown));
    let outcome = select.handle_event(&mut document, SelectEvent::KeyDown(SelectKey::Enter));

    assert!(outcome.prevent_default);
    assert_eq!(document.field("supply-id").value, "3");
    assert_eq!(document.field("supply-search").value, "Drill");
}

#[test]
fn escape_closes_without_touching_selection() {
    let (mut document, mut select) = attached();
    select.select(&mut document, "1");
    select.open(&mut document);
    select.handle_event(&mut document, SelectEvent::KeyDown(SelectKey::ArrowDown));

    let outcome = select.handle_event(&mut document, SelectEvent::KeyDown(SelectKey::Escape));
    assert!(outcome.prevent_default);
    assert!(!select.is_open());
    assert_eq!(select.state().selected_value, "1");
    assert_eq!(document.field("supply-id").value, "1");
}

#[test]
fn arrow_up_opens_a_closed_popup_without_moving() {
    let (mut document, mut select) = attached();
    let outcome = select.handle_event(&mut document, SelectEvent::KeyDown(SelectKey::ArrowUp));

    assert!(outcome.prevent_default);
    assert!(select.is_open());
    assert_eq!(select.highlighted_index(), None);
}

#[test]
fn escape_leaves_a_closed_popup_closed() {
    let (mut document, mut select) = attached();
    let outcome = select.handle_event(&mut document, SelectEvent::KeyDown(SelectKey::Escape));

    assert!(outcome.prevent_default);
    assert!(!outcome.changed);
    assert!(!select.is_open());
    assert_eq!(select.mount(), PopupMount::Anchored);
}

#[test]
fn selecting_restores_plain_labels() {
    let (mut document, mut select) = attached();
    select.open(&mut document);
    document.type_text("ham");
    select.filter(&mut document);
    assert!(document.presented().rows.iter().any(|row| row.label.iter().any(|segment| segment.emphasized)));

    select.select(&mut document, "1");
    let rows = &document.presented().rows;
    assert!(rows.iter().all(|row| row.visible && !row.highlighted));
    assert!(rows.iter().flat_map(|row| &row.label).all(|segment| !segment.emphasized));
}

#[test]
fn selecting_without_available_quantity_leaves_quantity_field_alone() {
    let (mut document, mut select) = attached();
    select.select(&mut document, "1");

    let quantity = document.field("quantity-input");
    assert!(quantity.attributes.get("max").is_none());
    assert!(quantity.attributes.get("placeholder").is_none());

    select.select(&mut document, "2");
    select.select(&mut document, "3");
    let quantity = document.field("quantity-input");
    assert_eq!(quantity.attributes.get("max").map(String::as_str), Some("5"));
}

#[test]
fn open_places_popup_and_focuses_input() {
    let (mut document, mut select) = attached();
    select.handle_event(&mut document, SelectEvent::InputPressed);

    assert_eq!(document.focused, Some(ElementId::new("supply-search")));
    let placement = select.mount().placement().expect("detached while open");
    assert_eq!(placement.tier, LayoutTier::Wide);
    assert_eq!(placement.left, 40.0);
    assert_eq!(placement.top, 136.0);
    assert_eq!(placement.width, 440.0);
    assert!(document.presented().is_open());
}

#[test]
fn outside_press_closes_but_inside_press_does_not() {
    let (mut document, mut select) = attached();
    select.open(&mut document);

    select.handle_event(
        &mut document,
        SelectEvent::PointerDown {
            target: Some(ElementId::new("row-2")),
        },
    );
    assert!(select.is_open());
    select.handle_event(
        &mut document,
        SelectEvent::PointerDown {
            target: Some(ElementId::new("supply-search")),
        },
    );
    assert!(select.is_open());

    select.handle_event(
        &mut document,
        SelectEvent::PointerDown {
            target: Some(ElementId::new("page-body")),
        },
    );
    assert!(!select.is_open());
}

#[test]
fn scroll_closes_detached_popup() {
    let (mut document, mut select) = attached();
    select.open(&mut document);
    select.handle_event(&mut document, SelectEvent::Scrolled);
    assert!(!select.is_open());
    assert!(!document.presented().is_open());
}

#[test]
fn resize_reflows_after_debounce_and_stays_open() {
    let (mut document, mut select) = attached();
    select.open(&mut document);
    let start = Instant::now();

    document.viewport = Viewport::new(900.0, 800.0);
    select.handle_event(&mut document, SelectEvent::Resized { at: start });
    select.handle_event(
        &mut document,
        SelectEvent::Resized {
            at: start + Duration::from_millis(50),
        },
    );
    assert!(!select.tick(&mut document, start + Duration::from_millis(120)));
    assert_eq!(select.next_deadline(), Some(start + Duration::from_millis(150)));

    document.viewport = Viewport::new(600.0, 800.0);
    assert!(select.tick(&mut document, start + Duration::from_millis(160)));
    assert!(select.is_open());
    let placement = select.mount().placement().unwrap();
    assert_eq!(placement.tier, LayoutTier::Compact);
    assert_eq!(placement.width, 300.0);
    assert_eq!(select.next_deadline(), None);
}

#[test]
fn closing_cancels_pending_reflow() {
    let (mut document, mut select) = attached();
    select.open(&mut document);
    let start = Instant::now();
    select.handle_event(&mut document, SelectEvent::Resized { at: start });
    select.close(&mut document);
    assert_eq!(select.next_deadline(), None);
    assert!(!select.tick(&mut document, start + Duration::from_secs(1)));
}

#[test]
fn clear_button_resets_search_and_selection() {
    let (mut document, mut select) = attached();
    select.select(&mut document, "1");
    document.type_text("ham");
    select.filter(&mut document);
    assert!(document.field("clear-search").visible);

    select.handle_event(&mut document, SelectEvent::ClearPressed);
    assert_eq!(document.field("supply-search").value, "");
    assert_eq!(document.field("supply-id").value, "");
    assert!(!document.field("clear-search").visible);
    assert_eq!(select.visible_values(), vec!["1", "2", "3"]);
    assert_eq!(document.focused, Some(ElementId::new("supply-search")));
}

#[test]
fn instances_keep_independent_state() {
    let mut document = FakeDocument::supply_form(tool_rows());
    document.insert("borrow-search", Bounds::new(40.0, 300.0, 300.0, 36.0));
    document.insert("borrow-dropdown", Bounds::default());
    document.insert("borrow-id", Bounds::default());

    let mut supplies = SearchableSelect::attach(&mut document, config()).unwrap();
    let mut borrows =
        SearchableSelect::attach(&mut document, SelectConfig::new("borrow-search", "borrow-dropdown", "borrow-id")).unwrap();

    supplies.open(&mut document);
    supplies.handle_event(&mut document, SelectEvent::KeyDown(SelectKey::ArrowDown));
    assert!(!borrows.is_open());
    assert_eq!(borrows.highlighted_index(), None);

    borrows.select(&mut document, "3");
    assert_eq!(document.field("borrow-id").value, "3");
    assert_eq!(document.field("supply-id").value, "");
    assert!(supplies.is_open());
}
