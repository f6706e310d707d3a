//! Error type shared by the terminal, export and configuration layers.
//!
//! The live pipeline itself has no failure modes: stale results are dropped
//! and unexpected glyphs render as placeholders. Everything here belongs to
//! the edges (terminal setup, clipboard, file export, CLI validation).

pub type LensResult<T> = Result<T, LensError>;

#[derive(thiserror::Error, Debug)]
pub enum LensError {
    #[error("terminal error: {0}")]
    Terminal(String),

    #[error("clipboard error: {0}")]
    Clipboard(String),

    #[error("export error: {0}")]
    Export(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("layout error: {0}")]
    Layout(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LensError {
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    pub fn clipboard(msg: impl Into<String>) -> Self {
        Self::Clipboard(msg.into())
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(LensError::terminal("x").to_string().contains("terminal error:"));
        assert!(LensError::clipboard("x").to_string().contains("clipboard error:"));
        assert!(LensError::export("x").to_string().contains("export error:"));
        assert!(LensError::config("x").to_string().contains("config error:"));
        assert!(LensError::layout("x").to_string().contains("layout error:"));
    }

    #[test]
    fn io_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = LensError::from(base);
        assert!(err.to_string().contains("boom"));
    }
}
