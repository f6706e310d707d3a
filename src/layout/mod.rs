//! Layout - where things go on screen.
//!
//! - [`panes`] - taffy flexbox split into four columns and a button bar
//! - [`text_measure`] - shared column rules for every text surface

mod panes;
mod text_measure;

pub use panes::{ButtonId, PaneId, PaneLayout};
pub use text_measure::{string_width, truncate_text, ContentSize, Placed, TextMetrics};
