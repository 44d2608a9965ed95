//! The searchable select state machine.
//!
//! One [`SearchableSelect`] owns the rows read from its popup and the
//! [`SelectionState`] of a single form control. It mutates the host only
//! through [`SelectHost`] and re-presents the popup after each change.

use std::time::Instant;

use stockpick_types::{ElementId, OptionRecord};
use tracing::{debug, warn};

use crate::config::{LayoutOptions, SelectConfig};
use crate::debounce::Debounce;
use crate::error::SelectError;
use crate::event::{EventOutcome, SelectEvent, SelectKey};
use crate::filter::{self, LabelSegment};
use crate::host::{PopupMount, PopupPresentation, RowView, SelectHost};
use crate::placement::{Anchors, compute_placement};
use crate::state::SelectionState;

#[derive(Debug, Clone)]
struct OptionRow {
    record: OptionRecord,
    visible: bool,
    label: Vec<LabelSegment>,
}

impl OptionRow {
    fn new(record: OptionRecord) -> Self {
        let label = vec![LabelSegment::plain(record.display_name())];
        Self {
            record,
            visible: true,
            label,
        }
    }

    fn reset(&mut self) {
        self.visible = true;
        self.label = vec![LabelSegment::plain(self.record.display_name())];
    }
}

#[derive(Debug)]
pub struct SearchableSelect {
    config: SelectConfig,
    layout: LayoutOptions,
    rows: Vec<OptionRow>,
    state: SelectionState,
    mount: PopupMount,
    reflow: Debounce,
    results_label: String,
    no_results: Option<String>,
}

impl SearchableSelect {
    /// Wires a select to `host` with default layout options.
    ///
    /// Returns `None` (after logging a warning) when a mandatory element is
    /// missing, so pages without the relevant form simply get no widget.
    pub fn attach<H: SelectHost>(host: &mut H, config: SelectConfig) -> Option<Self> {
        Self::attach_with(host, config, LayoutOptions::default())
    }

    pub fn attach_with<H: SelectHost>(host: &mut H, config: SelectConfig, layout: LayoutOptions) -> Option<Self> {
        match Self::try_attach(host, config, layout) {
            Ok(select) => Some(select),
            Err(error) => {
                warn!(%error, "searchable select left unwired");
                None
            }
        }
    }

    pub fn try_attach<H: SelectHost>(host: &mut H, config: SelectConfig, layout: LayoutOptions) -> Result<Self, SelectError> {
        let missing: Vec<ElementId> = [&config.search_input, &config.popup, &config.hidden_input]
            .into_iter()
            .filter(|id| !host.has_element(id))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(SelectError::MissingElements {
                search_input: config.search_input.clone(),
                missing,
            });
        }

        let rows: Vec<OptionRow> = host.option_rows(&config.popup).into_iter().map(OptionRow::new).collect();
        let state = SelectionState {
            selected_value: host.value(&config.hidden_input).unwrap_or_default(),
            ..SelectionState::default()
        };
        let selectable = rows.iter().filter(|row| !row.record.is_placeholder()).count();

        let select = Self {
            reflow: Debounce::new(layout.resize_debounce),
            config,
            layout,
            rows,
            state,
            mount: PopupMount::Anchored,
            results_label: filter::results_label(selectable),
            no_results: None,
        };
        debug!(input = %select.config.search_input, rows = select.rows.len(), "searchable select attached");
        select.present(host);
        Ok(select)
    }

    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn mount(&self) -> PopupMount {
        self.mount
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        self.state.highlighted
    }

    /// Value of the highlighted row, if any.
    pub fn highlighted_value(&self) -> Option<&str> {
        let visible = self.visible_row_indices();
        self.state
            .highlighted
            .and_then(|position| visible.get(position))
            .map(|index| self.rows[*index].record.value.as_str())
    }

    /// Values of the rows currently visible, in display order.
    pub fn visible_values(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| row.visible)
            .map(|row| row.record.value.as_str())
            .collect()
    }

    /// Instant at which a pending resize reflow becomes due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.reflow.deadline()
    }

    pub fn presentation(&self) -> PopupPresentation {
        let visible = self.visible_row_indices();
        let highlighted_row = self.state.highlighted.and_then(|position| visible.get(position).copied());
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| RowView {
                value: row.record.value.clone(),
                label: row.label.clone(),
                visible: row.visible,
                highlighted: highlighted_row == Some(index),
                placeholder: row.record.is_placeholder(),
            })
            .collect();

        PopupPresentation {
            mount: self.mount,
            rows,
            results_label: self.results_label.clone(),
            no_results: self.no_results.clone(),
        }
    }

    /// Routes one host event and reports how the host should follow up.
    pub fn handle_event<H: SelectHost>(&mut self, host: &mut H, event: SelectEvent) -> EventOutcome {
        match event {
            SelectEvent::InputPressed => {
                if self.state.is_open {
                    return EventOutcome::IGNORED;
                }
                self.open(host);
                EventOutcome::changed()
            }
            SelectEvent::InputChanged | SelectEvent::CategoryChanged => {
                self.filter(host);
                EventOutcome::changed()
            }
            SelectEvent::ClearPressed => {
                if self.config.clear_button.is_none() {
                    return EventOutcome::IGNORED;
                }
                self.clear(host);
                EventOutcome::changed()
            }
            SelectEvent::OptionPressed { value } => match self.rows.iter().position(|row| row.record.value == value) {
                Some(index) => {
                    self.select_row(host, index);
                    EventOutcome::changed()
                }
                None => EventOutcome::IGNORED,
            },
            SelectEvent::PointerDown { target } => {
                if !self.state.is_open || self.is_inside(host, target.as_ref()) {
                    return EventOutcome::IGNORED;
                }
                self.close(host);
                EventOutcome::changed()
            }
            SelectEvent::KeyDown(key) => self.handle_key(host, key),
            SelectEvent::Scrolled => {
                if !(self.state.is_open && self.mount.is_detached()) {
                    return EventOutcome::IGNORED;
                }
                self.close(host);
                EventOutcome::changed()
            }
            SelectEvent::Resized { at } => {
                if self.state.is_open && self.mount.is_detached() {
                    self.reflow.schedule(at);
                }
                EventOutcome::IGNORED
            }
        }
    }

    /// Runs a due resize reflow. Returns true when the popup moved.
    pub fn tick<H: SelectHost>(&mut self, host: &mut H, now: Instant) -> bool {
        if !self.reflow.fire_if_due(now) || !self.state.is_open {
            return false;
        }
        self.mount = PopupMount::Detached(self.compute_placement(host));
        debug!(input = %self.config.search_input, "popup reflowed after resize");
        self.present(host);
        true
    }

    pub fn open<H: SelectHost>(&mut self, host: &mut H) {
        if self.state.is_open {
            return;
        }
        self.state.is_open = true;
        self.mount = PopupMount::Detached(self.compute_placement(host));
        host.focus(&self.config.search_input);
        debug!(input = %self.config.search_input, "popup opened");
        self.present(host);
    }

    pub fn close<H: SelectHost>(&mut self, host: &mut H) {
        if !self.state.is_open {
            return;
        }
        self.state.is_open = false;
        self.state.highlighted = None;
        self.mount = PopupMount::Anchored;
        self.reflow.cancel();
        debug!(input = %self.config.search_input, "popup closed");
        self.present(host);
    }

    pub fn toggle<H: SelectHost>(&mut self, host: &mut H) {
        if self.state.is_open {
            self.close(host);
        } else {
            self.open(host);
        }
    }

    /// Recomputes row visibility from the search input and category filter.
    pub fn filter<H: SelectHost>(&mut self, host: &mut H) {
        let raw_input = host.value(&self.config.search_input).unwrap_or_default();
        let term = filter::normalize_term(&raw_input);
        let category = self
            .config
            .category_filter
            .as_ref()
            .and_then(|id| host.value(id))
            .unwrap_or_default();

        self.state.highlighted = None;
        if let Some(clear) = &self.config.clear_button {
            host.set_visible(clear, !term.is_empty());
        }

        let mut visible_count = 0;
        for row in &mut self.rows {
            row.visible = filter::is_row_visible(&row.record, &term, &category);
            row.label = if row.visible && !term.is_empty() {
                filter::emphasize(row.record.display_name(), &term)
            } else {
                vec![LabelSegment::plain(row.record.display_name())]
            };
            if row.visible {
                visible_count += 1;
            }
        }

        self.no_results = filter::no_results_message(visible_count, &raw_input, &term, &category);
        self.results_label = filter::results_label(visible_count);
        self.state.search_term = term;
        self.state.category_filter = category;
        self.present(host);
    }

    /// Selects the row carrying `value`. Returns false when no row matches.
    pub fn select<H: SelectHost>(&mut self, host: &mut H, value: &str) -> bool {
        match self.rows.iter().position(|row| row.record.value == value) {
            Some(index) => {
                self.select_row(host, index);
                true
            }
            None => false,
        }
    }

    /// Empties the search input and the selection, then re-filters.
    pub fn clear<H: SelectHost>(&mut self, host: &mut H) {
        host.set_value(&self.config.search_input, "");
        host.set_value(&self.config.hidden_input, "");
        self.state.selected_value.clear();
        if let Some(clear) = &self.config.clear_button {
            host.set_visible(clear, false);
        }
        self.filter(host);
        host.focus(&self.config.search_input);
    }

    fn select_row<H: SelectHost>(&mut self, host: &mut H, index: usize) {
        let record = self.rows[index].record.clone();
        let text = record.display_name().to_string();

        host.set_value(&self.config.hidden_input, &record.value);
        host.set_value(&self.config.search_input, &text);
        self.state.selected_value = record.value.clone();

        if let (Some(available), Some(quantity)) = (record.available_hint(), self.config.quantity_field.as_ref())
            && host.has_element(quantity)
        {
            host.set_attribute(quantity, "max", available);
            host.set_attribute(quantity, "placeholder", &format!("Enter quantity (max {available})"));
        }

        self.close(host);

        // Back to the unfiltered list. The placeholder row is visible and
        // navigable again until the next filter pass hides it.
        for row in &mut self.rows {
            row.reset();
        }
        if let Some(category) = &self.config.category_filter
            && host.has_element(category)
        {
            host.set_value(category, "");
        }
        if let Some(clear) = &self.config.clear_button {
            host.set_visible(clear, false);
        }
        self.state.reset_filters();
        let selectable = self.rows.iter().filter(|row| !row.record.is_placeholder()).count();
        self.results_label = filter::results_label(selectable);
        self.no_results = None;

        debug!(input = %self.config.search_input, value = %record.value, "option selected");
        self.present(host);
    }

    fn handle_key<H: SelectHost>(&mut self, host: &mut H, key: SelectKey) -> EventOutcome {
        match key {
            SelectKey::ArrowDown | SelectKey::ArrowUp => {
                if !self.state.is_open {
                    self.open(host);
                    return EventOutcome::consumed(true);
                }
                let visible_count = self.visible_row_indices().len();
                if visible_count == 0 {
                    return EventOutcome::consumed(false);
                }
                let next = match (key, self.state.highlighted) {
                    (SelectKey::ArrowDown, None) => 0,
                    (SelectKey::ArrowDown, Some(position)) => (position + 1).min(visible_count - 1),
                    (_, None) => 0,
                    (_, Some(position)) => position.saturating_sub(1),
                };
                self.state.highlighted = Some(next);
                self.present(host);
                EventOutcome::consumed(true)
            }
            SelectKey::Enter => {
                let visible = self.visible_row_indices();
                match self.state.highlighted.and_then(|position| visible.get(position).copied()) {
                    Some(index) => {
                        self.select_row(host, index);
                        EventOutcome::consumed(true)
                    }
                    None => EventOutcome::consumed(false),
                }
            }
            SelectKey::Escape => {
                let was_open = self.state.is_open;
                self.close(host);
                EventOutcome::consumed(was_open)
            }
            SelectKey::Other => EventOutcome::IGNORED,
        }
    }

    fn is_inside<H: SelectHost>(&self, host: &H, target: Option<&ElementId>) -> bool {
        target.is_some_and(|target| host.contains(&self.config.search_input, target) || host.contains(&self.config.popup, target))
    }

    fn visible_row_indices(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.visible)
            .map(|(index, _)| index)
            .collect()
    }

    fn compute_placement<H: SelectHost>(&self, host: &H) -> crate::placement::Placement {
        let bounds_of = |id: &Option<ElementId>| id.as_ref().and_then(|id| host.bounds(id));
        let anchors = Anchors {
            trigger: host.bounds(&self.config.search_input).unwrap_or_default(),
            secondary: bounds_of(&self.config.quantity_field),
            tertiary: bounds_of(&self.config.wide_anchor),
        };
        compute_placement(&self.layout.breakpoints, host.viewport(), &anchors)
    }

    fn present<H: SelectHost>(&self, host: &mut H) {
        host.present_popup(&self.config.popup, &self.presentation());
    }
}
