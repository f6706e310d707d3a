//! Clipboard backends.
//!
//! - [`Osc52Clipboard`] asks the terminal to set the system clipboard with
//!   an OSC 52 escape. Works over SSH, needs no platform libraries.
//! - [`InternalClipboard`] keeps the text in a thread-local buffer.

use std::cell::RefCell;
use std::io::Write;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::config::ClipboardBackend;
use crate::error::{LensError, LensResult};

pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> LensResult<()>;
}

/// Build the backend selected in config, writing OSC 52 to stdout.
pub fn from_backend(backend: ClipboardBackend) -> Box<dyn Clipboard> {
    match backend {
        ClipboardBackend::Osc52 => Box::new(Osc52Clipboard::new(std::io::stdout())),
        ClipboardBackend::Internal => Box::new(InternalClipboard),
    }
}

// =============================================================================
// OSC 52
// =============================================================================

pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// `ESC ] 52 ; c ; <base64> BEL`
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn set_text(&mut self, text: &str) -> LensResult<()> {
        self.out
            .write_all(osc52_sequence(text).as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|e| LensError::clipboard(e.to_string()))
    }
}

// =============================================================================
// Internal Buffer
// =============================================================================

thread_local! {
    static CLIPBOARD_BUFFER: RefCell<Option<String>> = const { RefCell::new(None) };
}

pub struct InternalClipboard;

impl Clipboard for InternalClipboard {
    fn set_text(&mut self, text: &str) -> LensResult<()> {
        CLIPBOARD_BUFFER.with(|buf| {
            *buf.borrow_mut() = Some(text.to_string());
        });
        Ok(())
    }
}

/// Most recently copied text.
pub fn paste() -> Option<String> {
    CLIPBOARD_BUFFER.with(|buf| buf.borrow().clone())
}

pub fn clear() {
    CLIPBOARD_BUFFER.with(|buf| {
        *buf.borrow_mut() = None;
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        clear();
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_internal_copy_overwrites() {
        setup();
        assert!(paste().is_none());

        let mut clip = InternalClipboard;
        clip.set_text("First").unwrap();
        clip.set_text(" \t\n").unwrap();
        assert_eq!(paste(), Some(" \t\n".to_string()));
    }

    #[test]
    fn test_internal_copy_empty_is_stored() {
        setup();
        InternalClipboard.set_text("").unwrap();
        assert_eq!(paste(), Some(String::new()));
    }

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
        assert_eq!(osc52_sequence(""), "\x1b]52;c;\x07");
    }

    #[test]
    fn test_osc52_writes_to_terminal() {
        let mut clip = Osc52Clipboard::new(Vec::new());
        clip.set_text(" \t").unwrap();
        let written = String::from_utf8(clip.into_inner()).unwrap();
        assert_eq!(written, osc52_sequence(" \t"));
    }

    #[test]
    fn test_osc52_failure_is_clipboard_error() {
        let mut clip = Osc52Clipboard::new(BrokenPipe);
        let err = clip.set_text("x").unwrap_err();
        assert!(matches!(err, LensError::Clipboard(_)));
    }
}
