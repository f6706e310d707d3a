//! Input and side-effect state.
//!
//! - [`keyboard`] / [`mouse`] - event types
//! - [`input`] - crossterm conversion and polling
//! - [`clipboard`] - OSC 52 and in-process clipboard backends

pub mod clipboard;
pub mod input;
pub mod keyboard;
pub mod mouse;

pub use clipboard::Clipboard;
pub use input::InputEvent;
pub use keyboard::{KeyboardEvent, Modifiers};
pub use mouse::{MouseAction, MouseButton, MouseEvent, ScrollDirection};
