//! Error taxonomy for the scaffolding pipeline.
//!
//! One variant per pipeline step so the user always sees which step failed.
//! None of these are retried automatically; the caller decides whether to
//! re-run the whole operation.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The target directory (or a file of that name) already exists and
    /// `--force` was not given. Checked before any network or disk I/O.
    #[error("`{}` already exists; use --force to scaffold into it anyway", .0.display())]
    AlreadyExists(PathBuf),

    /// The "latest release" lookup failed: network error, timeout, non-2xx
    /// status, or a body missing the archive-URL field.
    #[error("could not resolve the latest release: {0:#}")]
    Resolution(anyhow::Error),

    /// The archive download failed: transport error, non-2xx status, or a
    /// local write failure. A partial file may remain; cleanup is attempted.
    #[error("archive download failed: {0:#}")]
    Download(anyhow::Error),

    /// The downloaded file could not be opened or read as a zip archive.
    #[error("downloaded archive is corrupt or unreadable: {0:#}")]
    CorruptArchive(anyhow::Error),

    /// The archive does not have the expected single-wrapper-directory shape.
    #[error("unexpected archive layout: {0}")]
    UnexpectedArchiveLayout(String),

    /// Local filesystem preparation failed (creating the target directory,
    /// reserving the temporary archive name, merging extracted content).
    #[error("workspace error: {0:#}")]
    Workspace(anyhow::Error),

    /// The dependency installer could not be launched or exited non-zero.
    /// The scaffolded directory is left in place.
    #[error("dependency installation failed: {0:#}")]
    Install(anyhow::Error),
}
