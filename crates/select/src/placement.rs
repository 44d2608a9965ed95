//! Popup geometry for the detached rendering mode.
//!
//! The popup is positioned in viewport coordinates below the search input.
//! Its width follows one of three strategies chosen by viewport width:
//!
//! - **Compact** (`<= compact_max`): the input's width, clamped so the popup
//!   keeps `edge_margin` on both sides of the viewport.
//! - **Medium** (`<= medium_max`): stretched to the quantity field's right edge.
//! - **Wide**: stretched to the wide anchor (return date), then the quantity
//!   field, then the input itself.
//!
//! The fallback chains are intentionally asymmetric: compact layouts ignore
//! both reference fields.

use serde::{Deserialize, Serialize};
use stockpick_types::{Bounds, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    pub compact_max: f32,
    pub medium_max: f32,
    pub edge_margin: f32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            compact_max: 768.0,
            medium_max: 1024.0,
            edge_margin: 16.0,
        }
    }
}

impl Breakpoints {
    pub fn tier(&self, viewport_width: f32) -> LayoutTier {
        if viewport_width <= self.compact_max {
            LayoutTier::Compact
        } else if viewport_width <= self.medium_max {
            LayoutTier::Medium
        } else {
            LayoutTier::Wide
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutTier {
    Compact,
    Medium,
    Wide,
}

/// Bounds of the trigger input and the optional reference fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchors {
    pub trigger: Bounds,
    /// Quantity field.
    pub secondary: Option<Bounds>,
    /// Wide-layout anchor (return date field).
    pub tertiary: Option<Bounds>,
}

/// Fixed, viewport-relative position of the detached popup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub tier: LayoutTier,
}

pub fn compute_placement(breakpoints: &Breakpoints, viewport: Viewport, anchors: &Anchors) -> Placement {
    let trigger = anchors.trigger;
    let tier = breakpoints.tier(viewport.width);
    let (left, width) = match tier {
        LayoutTier::Compact => {
            let margin = breakpoints.edge_margin;
            let width = trigger.width.min(viewport.width - margin * 2.0);
            (trigger.left.max(margin), width)
        }
        LayoutTier::Medium => {
            let end = anchors.secondary.map(|bounds| bounds.right()).unwrap_or(trigger.right());
            (trigger.left, end - trigger.left)
        }
        LayoutTier::Wide => {
            let end = anchors
                .tertiary
                .or(anchors.secondary)
                .map(|bounds| bounds.right())
                .unwrap_or(trigger.right());
            (trigger.left, end - trigger.left)
        }
    };

    Placement {
        left,
        top: trigger.bottom(),
        width: width.max(0.0),
        tier,
    }
}
