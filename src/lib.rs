//! # wslens
//!
//! Live Whitespace transpiler visualizer for the terminal.
//!
//! Type assembly in the Source pane; after a short pause the source is
//! transformed and three views update together: the AST, a debug listing
//! and the encoded Whitespace program, drawn with a per-character overlay.
//!
//! ## Architecture
//!
//! ```text
//! SourceEditor → Debouncer → Invoker → OutputState → panes / overlay / export
//! ```
//!
//! ## Modules
//!
//! - [`transform`] - the [`Transform`](transform::Transform) seam and the built-in assembler
//! - [`pipeline`] - debounce, staleness guard, generation-counted output snapshot, worker thread
//! - [`overlay`] - glyph classification, scroll mirroring, overlay painting
//! - [`primitives`] - editor, read-only panes, buttons
//! - [`layout`] - taffy pane layout and shared text metrics
//! - [`renderer`] - cell buffer and diff renderer
//! - [`state`] - input events and clipboard backends
//! - [`export`] - copy and download actions
//! - [`app`] - headless application state
//! - [`runtime`] - terminal setup and the event loop

pub mod app;
pub mod config;
pub mod error;
pub mod export;
pub mod layout;
pub mod overlay;
pub mod pipeline;
pub mod primitives;
pub mod renderer;
pub mod runtime;
pub mod state;
pub mod theme;
pub mod transform;
pub mod types;

pub use app::App;
pub use config::Config;
pub use error::{LensError, LensResult};
pub use transform::{Transform, TransformOutput, WhitespaceAssembler};
