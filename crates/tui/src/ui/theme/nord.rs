//! Nord (https://www.nordtheme.com) mapped onto the form palette.

use ratatui::style::Color;

use super::roles::{Palette, Theme};

const POLAR_NIGHT: [Color; 4] = [
    Color::Rgb(0x2E, 0x34, 0x40),
    Color::Rgb(0x3B, 0x42, 0x52),
    Color::Rgb(0x43, 0x4C, 0x5E),
    Color::Rgb(0x4C, 0x56, 0x6A),
];
const SNOW_STORM: [Color; 3] = [
    Color::Rgb(0xD8, 0xDE, 0xE9),
    Color::Rgb(0xE5, 0xE9, 0xF0),
    Color::Rgb(0xEC, 0xEF, 0xF4),
];
const FROST_CYAN: Color = Color::Rgb(0x88, 0xC0, 0xD0);
const FROST_BLUE: Color = Color::Rgb(0x5E, 0x81, 0xAC);
const AURORA_RED: Color = Color::Rgb(0xBF, 0x61, 0x6A);
const AURORA_GREEN: Color = Color::Rgb(0xA3, 0xBE, 0x8C);
const AURORA_PURPLE: Color = Color::Rgb(0xB4, 0x8E, 0xAD);
const COMMENT: Color = Color::Rgb(0x61, 0x6E, 0x88);

#[derive(Debug, Clone)]
pub struct NordTheme {
    palette: Palette,
}

impl NordTheme {
    pub fn new() -> Self {
        Self {
            palette: Palette {
                surface: POLAR_NIGHT[0],
                popup_surface: POLAR_NIGHT[1],
                outline: POLAR_NIGHT[3],
                outline_focused: FROST_CYAN,
                text: SNOW_STORM[0],
                label: SNOW_STORM[1],
                muted: COMMENT,
                title_accent: AURORA_PURPLE,
                match_accent: FROST_CYAN,
                ok: AURORA_GREEN,
                error: AURORA_RED,
                highlight_fg: SNOW_STORM[2],
                highlight_bg: FROST_BLUE,
            },
        }
    }
}

impl Default for NordTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme for NordTheme {
    fn palette(&self) -> &Palette {
        &self.palette
    }
}
