//! Drawing of the detached option popup.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState, Paragraph},
};
use stockpick_select::PopupPresentation;

use crate::ui::theme::{
    Theme,
    theme_helpers::{field_block, label_spans},
};

/// Draws the popup into `area` and returns the screen rectangle of every
/// drawn row together with its option value.
pub fn render_popup(frame: &mut Frame, area: Rect, presentation: &PopupPresentation, theme: &dyn Theme) -> Vec<(Rect, String)> {
    if area.is_empty() || !presentation.is_open() {
        return Vec::new();
    }
    frame.render_widget(Clear, area);
    let container = field_block(theme, None, true).style(theme.popup_style());
    let inner = container.inner(area);
    frame.render_widget(container, area);

    let [counter_area, list_area] = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
    frame.render_widget(
        Paragraph::new(Span::styled(presentation.results_label.clone(), theme.label_style())),
        counter_area,
    );

    if let Some(message) = &presentation.no_results {
        frame.render_widget(Paragraph::new(Span::styled(message.clone(), theme.muted_style())), list_area);
        return Vec::new();
    }

    let rows: Vec<_> = presentation.visible_rows().collect();
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let base = if row.placeholder {
                theme.muted_style()
            } else {
                theme.text_style()
            };
            ListItem::new(Line::from(label_spans(&row.label, base, theme.match_style())))
        })
        .collect();

    let mut state = ListState::default().with_selected(rows.iter().position(|row| row.highlighted));
    let list = List::new(items).highlight_style(theme.highlight_row_style());
    frame.render_stateful_widget(list, list_area, &mut state);

    let offset = state.offset();
    rows.iter()
        .enumerate()
        .skip(offset)
        .take(usize::from(list_area.height))
        .map(|(index, row)| {
            let y = list_area.y + u16::try_from(index - offset).unwrap_or(u16::MAX);
            (Rect::new(list_area.x, y, list_area.width, 1), row.value.clone())
        })
        .collect()
}
