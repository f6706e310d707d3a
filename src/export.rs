//! Export Actions - copy and download of the encoded output.
//!
//! Both actions read the current snapshot once, perform one side effect and
//! keep nothing afterwards. Failures are logged and otherwise ignored; they
//! never touch the output state.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{LensError, LensResult};
use crate::state::Clipboard;
use crate::transform::TransformOutput;

pub struct ExportActions {
    clipboard: Box<dyn Clipboard>,
    download_path: PathBuf,
}

impl ExportActions {
    pub fn new(clipboard: Box<dyn Clipboard>, download_path: PathBuf) -> Self {
        Self {
            clipboard,
            download_path,
        }
    }

    pub fn download_path(&self) -> &Path {
        &self.download_path
    }

    /// Put `encoded_output` on the clipboard. Returns `true` on success.
    pub fn copy(&mut self, output: &TransformOutput) -> bool {
        match self.clipboard.set_text(&output.encoded_output) {
            Ok(()) => {
                info!(bytes = output.encoded_output.len(), "copied encoded output");
                true
            }
            Err(err) => {
                warn!(error = %err, "copy failed");
                false
            }
        }
    }

    /// Write `encoded_output` to the download path. Returns the path written.
    pub fn download(&self, output: &TransformOutput) -> Option<&Path> {
        match write_file(&self.download_path, &output.encoded_output) {
            Ok(()) => {
                info!(
                    path = %self.download_path.display(),
                    bytes = output.encoded_output.len(),
                    "downloaded encoded output"
                );
                Some(&self.download_path)
            }
            Err(err) => {
                warn!(error = %err, "download failed");
                None
            }
        }
    }
}

fn write_file(path: &Path, contents: &str) -> LensResult<()> {
    fs::write(path, contents)
        .map_err(|e| LensError::export(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::clipboard::{self, InternalClipboard};

    struct FailingClipboard;

    impl Clipboard for FailingClipboard {
        fn set_text(&mut self, _: &str) -> LensResult<()> {
            Err(LensError::clipboard("no terminal"))
        }
    }

    fn setup(dir: &Path) -> ExportActions {
        clipboard::clear();
        ExportActions::new(Box::new(InternalClipboard), dir.join("output.ws"))
    }

    #[test]
    fn test_copy_encoded_output_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut export = setup(dir.path());
        let output = TransformOutput::new("ast", "debug", " \t\n");

        assert!(export.copy(&output));
        assert_eq!(clipboard::paste(), Some(" \t\n".to_string()));
    }

    #[test]
    fn test_copy_failure_is_swallowed() {
        let mut export = ExportActions::new(Box::new(FailingClipboard), PathBuf::from("unused"));
        assert!(!export.copy(&TransformOutput::default()));
    }

    #[test]
    fn test_download_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let export = setup(dir.path());
        let output = TransformOutput::new("", "", "  \n\t");

        let path = export.download(&output).unwrap().to_path_buf();
        assert_eq!(path, dir.path().join("output.ws"));
        assert_eq!(fs::read_to_string(path).unwrap(), "  \n\t");
    }

    #[test]
    fn test_download_empty_output_creates_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let export = setup(dir.path());

        let path = export.download(&TransformOutput::default()).unwrap();
        assert!(path.exists());
        assert_eq!(fs::metadata(path).unwrap().len(), 0);
    }

    #[test]
    fn test_download_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let export = ExportActions::new(
            Box::new(InternalClipboard),
            dir.path().join("missing").join("output.ws"),
        );
        assert!(export.download(&TransformOutput::default()).is_none());
    }
}
