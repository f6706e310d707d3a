use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use wslens::config::{ClipboardBackend, Config, TransformMode, DEFAULT_DOWNLOAD_NAME};
use wslens::transform::WhitespaceAssembler;

/// Live Whitespace assembler with a synchronized whitespace overlay.
#[derive(Parser, Debug)]
#[command(name = "wslens", version)]
struct Cli {
    /// Source file to open and transform on startup.
    path: Option<PathBuf>,

    /// Quiet time after the last edit before transforming, in milliseconds.
    #[arg(long, default_value_t = 700)]
    debounce_ms: u64,

    /// Tab width shared by the Whitespace pane and its overlay.
    #[arg(long, default_value_t = 4)]
    tab_width: u16,

    /// Directory the download action writes into.
    #[arg(long, default_value = ".")]
    download_dir: PathBuf,

    /// File name the download action writes.
    #[arg(long, default_value = DEFAULT_DOWNLOAD_NAME)]
    download_name: String,

    /// Where the copy action puts the encoded output.
    #[arg(long, value_enum, default_value_t = ClipboardBackend::Osc52)]
    clipboard: ClipboardBackend,

    /// Run transforms on a background thread.
    #[arg(long)]
    worker: bool,

    /// Write tracing output to this file (filter with WSLENS_LOG).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            debounce: Duration::from_millis(self.debounce_ms),
            tab_width: self.tab_width,
            download_dir: self.download_dir.clone(),
            download_name: self.download_name.clone(),
            clipboard: self.clipboard,
            transform_mode: if self.worker {
                TransformMode::Worker
            } else {
                TransformMode::Inline
            },
        }
    }
}

/// The TUI owns stdout, so logs go to a file or nowhere.
fn init_logging(path: &Path) -> anyhow::Result<WorkerGuard> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .with_context(|| format!("log file '{}' has no file name", path.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_env("WSLENS_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install log subscriber: {e}"))?;
    Ok(guard)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.config();
    config.validate()?;

    let _log_guard = match &cli.log_file {
        Some(path) => Some(init_logging(path)?),
        None => None,
    };

    let initial = match &cli.path {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("read source '{}'", path.display()))?,
        ),
        None => None,
    };

    wslens::runtime::run(&config, Arc::new(WhitespaceAssembler), initial)?;
    Ok(())
}
