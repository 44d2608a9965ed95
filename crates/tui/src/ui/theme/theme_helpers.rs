use ratatui::{
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType},
};
use stockpick_select::LabelSegment;

use super::roles::Theme;

/// Bordered frame around one form field, titled with the field's label.
pub fn field_block<'a, T: Theme + ?Sized>(theme: &T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let border_type = if focused { BorderType::Thick } else { BorderType::Rounded };
    let block = Block::bordered()
        .border_type(border_type)
        .border_style(theme.outline_style(focused))
        .style(surface_style(theme));
    match title {
        Some(title) => block.title(Span::styled(title, theme.label_style().add_modifier(Modifier::BOLD))),
        None => block,
    }
}

pub fn surface_style<T: Theme + ?Sized>(theme: &T) -> Style {
    theme.text_style().bg(theme.palette().surface)
}

/// Text inside a field; values the form would reject switch to the error color.
pub fn field_text_style<T: Theme + ?Sized>(theme: &T, valid: bool, focused: bool) -> Style {
    let style = if valid { surface_style(theme) } else { surface_style(theme).fg(theme.palette().error) };
    if focused { style.add_modifier(Modifier::BOLD) } else { style }
}

/// Turns widget label segments into spans, applying `highlight` to matches.
pub fn label_spans(segments: &[LabelSegment], base: Style, highlight: Style) -> Vec<Span<'static>> {
    segments
        .iter()
        .map(|segment| {
            let style = if segment.emphasized { base.patch(highlight) } else { base };
            Span::styled(segment.text.clone(), style)
        })
        .collect()
}
