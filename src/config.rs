//! Runtime configuration.
//!
//! Defaults match the behavior users expect from the visualizer: a 700 ms
//! quiescence window, four-column tabs and an `output.ws` download.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{LensError, LensResult};

/// Default quiescence window between the last edit and the transform.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(700);

/// Default tab width shared by the encoded surface and its overlay.
pub const DEFAULT_TAB_WIDTH: u16 = 4;

/// Default download file name.
pub const DEFAULT_DOWNLOAD_NAME: &str = "output.ws";

/// Largest tab width accepted by [`Config::validate`].
pub const MAX_TAB_WIDTH: u16 = 16;

/// Where `copy` sends the encoded output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ClipboardBackend {
    /// Terminal clipboard via the OSC 52 escape sequence.
    #[default]
    Osc52,
    /// In-process buffer only.
    Internal,
}

/// How the transform is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformMode {
    /// Called synchronously on the event loop.
    #[default]
    Inline,
    /// Called on a background thread; results are delivered through a channel.
    Worker,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub debounce: Duration,
    pub tab_width: u16,
    pub download_dir: PathBuf,
    pub download_name: String,
    pub clipboard: ClipboardBackend,
    pub transform_mode: TransformMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            tab_width: DEFAULT_TAB_WIDTH,
            download_dir: PathBuf::from("."),
            download_name: DEFAULT_DOWNLOAD_NAME.to_string(),
            clipboard: ClipboardBackend::default(),
            transform_mode: TransformMode::default(),
        }
    }
}

impl Config {
    /// Reject values the renderer or exporter cannot honor.
    pub fn validate(&self) -> LensResult<()> {
        if self.tab_width == 0 || self.tab_width > MAX_TAB_WIDTH {
            return Err(LensError::config(format!(
                "tab width must be between 1 and {MAX_TAB_WIDTH}, got {}",
                self.tab_width
            )));
        }
        if self.download_name.trim().is_empty() {
            return Err(LensError::config("download name must not be empty"));
        }
        if self.download_name.contains(['/', '\\']) {
            return Err(LensError::config(format!(
                "download name must be a plain file name, got {:?}",
                self.download_name
            )));
        }
        Ok(())
    }

    /// Full path the download action writes to.
    pub fn download_path(&self) -> PathBuf {
        self.download_dir.join(&self.download_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.debounce, Duration::from_millis(700));
        assert_eq!(config.tab_width, 4);
        assert_eq!(config.download_name, "output.ws");
        assert_eq!(config.clipboard, ClipboardBackend::Osc52);
        assert_eq!(config.transform_mode, TransformMode::Inline);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_tab_width() {
        let config = Config { tab_width: 0, ..Config::default() };
        assert!(config.validate().is_err());

        let config = Config { tab_width: 17, ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_download_name() {
        let config = Config { download_name: "  ".into(), ..Config::default() };
        assert!(config.validate().is_err());

        let config = Config { download_name: "a/b.ws".into(), ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_download_path() {
        let config = Config {
            download_dir: PathBuf::from("/tmp/out"),
            ..Config::default()
        };
        assert_eq!(config.download_path(), PathBuf::from("/tmp/out/output.ws"));
    }
}
