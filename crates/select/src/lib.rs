//! # Stockpick Select
//!
//! A searchable single-choice select that binds a text input, a popup list,
//! and a hidden value field into one controlled control. The widget never
//! touches a concrete UI toolkit: every element read or write goes through the
//! [`SelectHost`] surface and every user interaction arrives as a
//! [`SelectEvent`], so a browser bridge, a terminal form, and a unit test can
//! all drive the same instance.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockpick_select::{SearchableSelect, SelectConfig, SelectEvent, SelectKey};
//!
//! let config = SelectConfig::new("supply-search", "supply-dropdown", "supply-id")
//!     .with_quantity_field("quantity-input");
//! let Some(mut select) = SearchableSelect::attach(&mut host, config) else {
//!     return; // page has no supply form
//! };
//! select.handle_event(&mut host, SelectEvent::InputPressed);
//! select.handle_event(&mut host, SelectEvent::KeyDown(SelectKey::ArrowDown));
//! select.handle_event(&mut host, SelectEvent::KeyDown(SelectKey::Enter));
//! ```
//!
//! ## Modules
//!
//! - **`config`**: element identifiers and layout options
//! - **`host`**: the host surface and the popup view model it receives
//! - **`filter`**: search/category matching and label emphasis
//! - **`placement`**: breakpoint-driven popup geometry
//! - **`widget`**: the state machine itself

pub mod config;
pub mod debounce;
pub mod error;
pub mod event;
pub mod filter;
pub mod host;
pub mod placement;
pub mod state;
pub mod widget;

pub use config::{LayoutOptions, SelectConfig};
pub use debounce::Debounce;
pub use error::SelectError;
pub use event::{EventOutcome, SelectEvent, SelectKey};
pub use filter::LabelSegment;
pub use host::{PopupMount, PopupPresentation, RowView, SelectHost};
pub use placement::{Anchors, Breakpoints, LayoutTier, Placement};
pub use state::SelectionState;
pub use widget::SearchableSelect;
