//! Shared type definitions for the stockpick workspace.
//!
//! These types sit underneath both the host-independent selection widget and
//! the terminal host: element identifiers, viewport geometry, and the option
//! records read from markup or from a catalog file.

pub mod geometry;
pub mod option;

pub use geometry::{Bounds, Viewport};
pub use option::{OptionRecord, PLACEHOLDER_VALUE};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of an element owned by a host document.
///
/// Mirrors the `id` attribute a page gives each form control; the widget only
/// ever refers to elements by identifier and asks the host for everything
/// else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
