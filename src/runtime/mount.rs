//! Event loop.
//!
//! One thread, one loop: advance timers, redraw if anything changed, then
//! block on terminal input for at most the time until the next deadline.

use std::time::Instant;

use tracing::info;

use crate::app::App;
use crate::config::Config;
use crate::error::LensResult;
use crate::pipeline::SharedTransform;
use crate::renderer::{DiffRenderer, FrameBuffer};
use crate::state::clipboard;
use crate::state::input::{self, InputEvent};

use super::terminal::{self, TerminalGuard};

/// Run the visualizer until the user quits.
///
/// `initial` is loaded into the editor and transformed before the first frame.
pub fn run(config: &Config, transform: SharedTransform, initial: Option<String>) -> LensResult<()> {
    let _guard = TerminalGuard::enter()?;
    let (width, height) = terminal::size()?;

    let mut app = App::new(
        config,
        transform,
        clipboard::from_backend(config.clipboard),
        width,
        height,
    )?;
    if let Some(text) = initial {
        app.load_source(&text);
    }

    let mut renderer = DiffRenderer::new();
    let mut buffer = FrameBuffer::new(width, height);
    info!(width, height, mode = ?config.transform_mode, "started");

    loop {
        app.tick(Instant::now());
        if app.should_quit() {
            break;
        }

        if app.needs_redraw() {
            app.draw(&mut buffer);
            renderer.render(&buffer)?;
        }

        let timeout = app.poll_timeout(Instant::now());
        if let Some(event) = input::poll_event(timeout)? {
            if let InputEvent::Resize(..) = event {
                renderer.invalidate();
            }
            app.handle_event(event, Instant::now());
        }
    }

    info!(generation = app.generation(), "quit");
    Ok(())
}
