use std::fmt::Debug;

use ratatui::style::{Color, Modifier, Style};

/// Colors a palette assigns to the parts of the request form.
#[derive(Debug, Clone)]
pub struct Palette {
    pub surface: Color,
    /// Background of the detached popup so it reads as floating above the form.
    pub popup_surface: Color,
    pub outline: Color,
    pub outline_focused: Color,

    pub text: Color,
    pub label: Color,
    pub muted: Color,

    pub title_accent: Color,
    pub match_accent: Color,

    pub ok: Color,
    pub error: Color,

    pub highlight_fg: Color,
    pub highlight_bg: Color,
}

/// Style builders shared by every palette.
pub trait Theme: Send + Sync + Debug {
    fn palette(&self) -> &Palette;

    fn text_style(&self) -> Style {
        Style::new().fg(self.palette().text)
    }

    /// Field titles and the popup counter.
    fn label_style(&self) -> Style {
        Style::new().fg(self.palette().label)
    }

    /// Placeholders, hints and the no-results row.
    fn muted_style(&self) -> Style {
        Style::new().fg(self.palette().muted)
    }

    fn outline_style(&self, focused: bool) -> Style {
        let palette = self.palette();
        Style::new().fg(if focused { palette.outline_focused } else { palette.outline })
    }

    /// The highlighted popup row.
    fn highlight_row_style(&self) -> Style {
        let palette = self.palette();
        Style::new().fg(palette.highlight_fg).bg(palette.highlight_bg)
    }

    /// Part of an option label that matched the search term.
    fn match_style(&self) -> Style {
        Style::new()
            .fg(self.palette().match_accent)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    fn popup_style(&self) -> Style {
        let palette = self.palette();
        Style::new().bg(palette.popup_surface).fg(palette.text)
    }

    fn title_style(&self) -> Style {
        Style::new().fg(self.palette().title_accent).add_modifier(Modifier::BOLD)
    }

    fn ok_style(&self) -> Style {
        Style::new().fg(self.palette().ok)
    }

    fn error_style(&self) -> Style {
        Style::new().fg(self.palette().error)
    }
}
