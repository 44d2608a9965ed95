//! Terminal rendering and the event loop for the request form.

pub mod form_view;
pub mod layout;
pub mod popup;
pub mod runtime;
pub mod text_input;
pub mod theme;
