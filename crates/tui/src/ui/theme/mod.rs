//! Palettes for the terminal form.
//!
//! Selection order: the `TUI_THEME` environment variable, an explicit
//! override, the persisted preference, then Dracula. F2 cycles through
//! [`ThemeChoice::ALL`] at runtime.

pub mod dracula;
pub mod nord;
pub mod roles;
pub mod theme_helpers;

pub use dracula::DraculaTheme;
pub use nord::NordTheme;
pub use roles::{Palette, Theme};

use tracing::debug;

pub const THEME_ENV: &str = "TUI_THEME";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeChoice {
    #[default]
    Dracula,
    Nord,
}

impl ThemeChoice {
    pub const ALL: [ThemeChoice; 2] = [ThemeChoice::Dracula, ThemeChoice::Nord];

    /// Identifier persisted in settings.
    pub fn id(self) -> &'static str {
        match self {
            ThemeChoice::Dracula => "dracula",
            ThemeChoice::Nord => "nord",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeChoice::Dracula => "Dracula",
            ThemeChoice::Nord => "Nord",
        }
    }

    /// Matches ids and aliases, ignoring case and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "dracula" => Some(ThemeChoice::Dracula),
            "nord" | "polar" => Some(ThemeChoice::Nord),
            _ => None,
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|choice| *choice == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn build(self) -> Box<dyn Theme> {
        match self {
            ThemeChoice::Dracula => Box::new(DraculaTheme::new()),
            ThemeChoice::Nord => Box::new(NordTheme::new()),
        }
    }
}

/// Active palette plus the choice it came from.
pub struct LoadedTheme {
    pub choice: ThemeChoice,
    pub theme: Box<dyn Theme>,
}

impl From<ThemeChoice> for LoadedTheme {
    fn from(choice: ThemeChoice) -> Self {
        Self {
            choice,
            theme: choice.build(),
        }
    }
}

pub fn load(override_theme: Option<&str>, preferred_theme: Option<&str>) -> LoadedTheme {
    let from_env = std::env::var(THEME_ENV).ok();
    let candidates = [from_env.as_deref(), override_theme, preferred_theme];
    let choice = candidates.into_iter().flatten().find_map(|name| {
        let choice = ThemeChoice::from_name(name);
        if choice.is_none() {
            debug!(theme = name, "unknown theme requested; ignoring");
        }
        choice
    });
    LoadedTheme::from(choice.unwrap_or_default())
}
