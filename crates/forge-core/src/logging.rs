//! Logging init: file under the XDG state dir, or graceful fallback to stderr.

use anyhow::Result;
use std::fs;
use std::io;
use std::io::Write;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Writer handed to the subscriber: the log file, or stderr when the file
/// handle cannot be cloned for a new span/event.
enum LogWriter {
    File(fs::File),
    Stderr,
}

impl io::Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogWriter::File(f) => f.write(buf),
            LogWriter::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogWriter::File(f) => f.flush(),
            LogWriter::Stderr => io::stderr().lock().flush(),
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,forge=debug"))
}

fn init_file() -> Result<()> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("forge")?;
    let log_dir = xdg_dirs.get_state_home().join("forge");
    fs::create_dir_all(&log_dir)?;
    let log_file_path = log_dir.join("forge.log");

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    let writer = BoxMakeWriter::new(move || {
        file.try_clone()
            .map(LogWriter::File)
            .unwrap_or(LogWriter::Stderr)
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .init();

    tracing::info!("forge logging initialized at {}", log_file_path.display());
    Ok(())
}

/// Initialize structured logging to `~/.local/state/forge/forge.log`.
/// If the log dir is unwritable, fall back to stderr so the CLI still runs.
pub fn init() {
    if let Err(err) = init_file() {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(io::stderr)
            .with_ansi(false)
            .init();
        tracing::warn!("file logging unavailable ({:#}); logging to stderr", err);
    }
}
