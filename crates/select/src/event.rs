//! Interactions a host forwards to the widget.

use std::time::Instant;

use stockpick_types::ElementId;

/// Keys the select reacts to; everything else arrives as [`SelectKey::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectEvent {
    /// Pointer press on the search input.
    InputPressed,
    /// The search input's text changed.
    InputChanged,
    /// The category filter control changed value.
    CategoryChanged,
    /// The clear-search button was pressed.
    ClearPressed,
    /// Pointer press on the option row carrying `value`.
    OptionPressed { value: String },
    /// Pointer press anywhere in the document; `None` when no element was hit.
    PointerDown { target: Option<ElementId> },
    /// Key pressed while the search input has focus.
    KeyDown(SelectKey),
    /// The document scrolled.
    Scrolled,
    /// The viewport was resized at `at`.
    Resized { at: Instant },
}

/// What the host should do after dispatching an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// Suppress the host's default handling (form submit, caret movement).
    pub prevent_default: bool,
    /// Widget state or presentation changed and a redraw is due.
    pub changed: bool,
}

impl EventOutcome {
    pub const IGNORED: Self = Self {
        prevent_default: false,
        changed: false,
    };

    pub const fn changed() -> Self {
        Self {
            prevent_default: false,
            changed: true,
        }
    }

    pub const fn consumed(changed: bool) -> Self {
        Self {
            prevent_default: true,
            changed,
        }
    }
}
