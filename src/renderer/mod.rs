//! Terminal renderer - the "blind" output layer.
//!
//! The renderer knows only about cells. It takes a filled FrameBuffer and
//! writes the minimal ANSI needed to bring the terminal up to date.

pub mod ansi;
pub mod buffer;
pub mod diff;
pub mod output;

pub use buffer::FrameBuffer;
pub use diff::DiffRenderer;
pub use output::{OutputBuffer, StatefulCellRenderer};
