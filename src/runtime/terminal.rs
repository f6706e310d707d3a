//! Terminal setup and teardown.
//!
//! [`TerminalGuard`] switches to raw mode, the alternate screen, mouse
//! capture and bracketed paste, and puts everything back when dropped, also
//! on early return or panic unwind.

use std::io::{stdout, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use tracing::{debug, warn};

use crate::error::{LensError, LensResult};

pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub fn enter() -> LensResult<Self> {
        enable_raw_mode().map_err(|e| LensError::terminal(format!("raw mode: {e}")))?;
        // From here on, Drop undoes whatever succeeded
        let guard = Self { active: true };
        execute!(
            stdout(),
            EnterAlternateScreen,
            Hide,
            EnableMouseCapture,
            EnableBracketedPaste
        )
        .map_err(|e| LensError::terminal(format!("screen setup: {e}")))?;
        debug!("terminal entered");
        Ok(guard)
    }

    fn restore(&mut self) -> std::io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let mut out = stdout();
        execute!(
            out,
            DisableBracketedPaste,
            DisableMouseCapture,
            Show,
            LeaveAlternateScreen
        )?;
        out.flush()?;
        disable_raw_mode()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        match self.restore() {
            Ok(()) => debug!("terminal restored"),
            Err(err) => warn!(error = %err, "terminal restore failed"),
        }
    }
}

/// Current terminal size in cells.
pub fn size() -> LensResult<(u16, u16)> {
    crossterm::terminal::size().map_err(|e| LensError::terminal(format!("size: {e}")))
}
