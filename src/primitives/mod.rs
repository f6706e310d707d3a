//! UI primitives.
//!
//! - [`editor`] - the editable Source pane
//! - [`text_pane`] - read-only scrollable panes
//! - [`button`] - Copy/Download buttons

pub mod button;
pub mod editor;
pub mod text_pane;

pub use button::draw_button;
pub use editor::{EditOutcome, SourceEditor};
pub use text_pane::{draw_text_block, TextPane};
