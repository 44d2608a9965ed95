//! Rendering of the request form.

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::form::{Field, RequestForm, StatusLine};
use crate::ui::popup::render_popup;
use crate::ui::text_input::TextInputState;
use crate::ui::theme::{
    Theme,
    theme_helpers::{field_block, field_text_style, surface_style},
};

const HINTS: &str = "Tab next field · ↑/↓ highlight · Enter pick · Ctrl+S submit · F2 theme · Esc quit";

pub fn draw(frame: &mut Frame, form: &mut RequestForm, theme: &dyn Theme) {
    let area = frame.area();
    frame.render_widget(Paragraph::new("").style(surface_style(theme)), area);
    let layout = *form.layout();

    frame.render_widget(
        Paragraph::new(Span::styled("Supply request", theme.title_style())),
        layout.title,
    );

    draw_text_field(frame, form, theme, Field::Search, layout.search, "Supply", None);
    if form.is_clear_visible() && !layout.clear.is_empty() {
        frame.render_widget(Paragraph::new(Span::styled("[x]", theme.error_style())), layout.clear);
    }
    draw_category(frame, form, theme, layout.category);
    let placeholder = form.quantity_placeholder().map(str::to_string);
    draw_text_field(frame, form, theme, Field::Quantity, layout.quantity, "Quantity", placeholder.as_deref());
    draw_text_field(frame, form, theme, Field::ReturnDate, layout.return_date, "Return date", Some("YYYY-MM-DD"));

    if let Some(status) = form.status() {
        let span = match status {
            StatusLine::Info(message) => Span::styled(message.clone(), theme.ok_style()),
            StatusLine::Error(message) => Span::styled(message.clone(), theme.error_style()),
        };
        frame.render_widget(Paragraph::new(span), layout.status);
    }
    frame.render_widget(Paragraph::new(Span::styled(HINTS, theme.muted_style())), layout.hints);

    let hits = match form.presentation() {
        Some(presentation) => render_popup(frame, form.popup_area(), presentation, theme),
        None => Vec::new(),
    };
    form.set_popup_hits(hits);
}

fn draw_text_field(
    frame: &mut Frame,
    form: &RequestForm,
    theme: &dyn Theme,
    field: Field,
    area: Rect,
    title: &str,
    placeholder: Option<&str>,
) {
    if area.is_empty() {
        return;
    }
    let focused = form.focus() == field;
    let input = field_buffer(form, field);
    let container = field_block(theme, Some(title), focused);
    let inner = container.inner(area);
    frame.render_widget(container, area);

    let line = match (input.input().is_empty(), placeholder) {
        (true, Some(placeholder)) => Line::from(Span::styled(placeholder.to_string(), theme.muted_style())),
        _ => {
            let valid = field != Field::Quantity || form.quantity_within_max();
            Line::from(Span::styled(input.input().to_string(), field_text_style(theme, valid, focused)))
        }
    };
    frame.render_widget(Paragraph::new(line), inner);

    // The popup covers the fields below the search input; keep the caret off it.
    if focused && !form.popup_area().contains(Position::new(inner.x, inner.y)) {
        let column = inner.x.saturating_add(input.cursor_column()).min(inner.right().saturating_sub(1));
        frame.set_cursor_position(Position::new(column, inner.y));
    }
}

fn field_buffer(form: &RequestForm, field: Field) -> &TextInputState {
    match field {
        Field::Quantity => form.quantity_input(),
        Field::ReturnDate => form.return_date_input(),
        Field::Search | Field::Category => form.search_input(),
    }
}

fn draw_category(frame: &mut Frame, form: &RequestForm, theme: &dyn Theme, area: Rect) {
    if area.is_empty() {
        return;
    }
    let focused = form.focus() == Field::Category;
    let container = field_block(theme, Some("Category"), focused);
    let inner = container.inner(area);
    frame.render_widget(container, area);

    let name = form
        .active_category()
        .map_or_else(|| "All categories".to_string(), |category| category.name.clone());
    let arrows = if focused {
        theme.title_style()
    } else {
        theme.muted_style()
    };
    let line = Line::from(vec![
        Span::styled("< ", arrows),
        Span::styled(name, field_text_style(theme, true, focused).add_modifier(Modifier::ITALIC)),
        Span::styled(" >", arrows),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}
