use ratatui::style::Color;

use super::roles::{Palette, Theme};

// https://draculatheme.com/contribute
const BACKGROUND: Color = Color::Rgb(0x28, 0x2A, 0x36);
const CURRENT_LINE: Color = Color::Rgb(0x44, 0x47, 0x5A);
const FOREGROUND: Color = Color::Rgb(0xF8, 0xF8, 0xF2);
const COMMENT: Color = Color::Rgb(0x62, 0x72, 0xA4);
const CYAN: Color = Color::Rgb(0x8B, 0xE9, 0xFD);
const GREEN: Color = Color::Rgb(0x50, 0xFA, 0x7B);
const PINK: Color = Color::Rgb(0xFF, 0x79, 0xC6);
const PURPLE: Color = Color::Rgb(0xBD, 0x93, 0xF9);
const RED: Color = Color::Rgb(0xFF, 0x55, 0x55);
const POPUP: Color = Color::Rgb(0x1E, 0x1F, 0x29);

/// Default theme, tuned for dark terminals.
#[derive(Debug, Clone)]
pub struct DraculaTheme {
    palette: Palette,
}

impl DraculaTheme {
    pub fn new() -> Self {
        Self {
            palette: Palette {
                surface: BACKGROUND,
                popup_surface: POPUP,
                outline: CURRENT_LINE,
                outline_focused: PURPLE,
                text: FOREGROUND,
                label: COMMENT,
                muted: COMMENT,
                title_accent: PINK,
                match_accent: CYAN,
                ok: GREEN,
                error: RED,
                highlight_fg: FOREGROUND,
                highlight_bg: CURRENT_LINE,
            },
        }
    }
}

impl Default for DraculaTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme for DraculaTheme {
    fn palette(&self) -> &Palette {
        &self.palette
    }
}
