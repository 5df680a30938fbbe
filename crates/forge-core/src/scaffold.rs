//! The scaffolding pipeline.
//!
//! Strictly sequential: precondition check, release resolution, download,
//! extraction, archive cleanup, dependency installation. Any failure aborts
//! the remaining steps; the archive cleanup still runs once the archive
//! file exists, whatever happened after the download started.

use std::path::PathBuf;

use crate::archive;
use crate::config::ForgeConfig;
use crate::download;
use crate::error::ScaffoldError;
use crate::installer;
use crate::release;
use crate::workspace::Workspace;

/// One scaffolding run.
#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    /// Directory the template is unpacked into.
    pub target_dir: PathBuf,
    /// Bypass the target-exists precondition.
    pub force: bool,
    /// Stop after extraction; leave dependency installation to the user.
    pub skip_install: bool,
}

/// Runs the full pipeline for `req`.
///
/// A failed extraction leaves the target directory partially populated;
/// re-run with `force` or inspect it manually. A failed installation leaves
/// the scaffolded project fully in place.
pub fn run(ws: &Workspace, req: &ScaffoldRequest, cfg: &ForgeConfig) -> Result<(), ScaffoldError> {
    ws.ensure_absent(&req.target_dir, req.force)?;

    tracing::info!("resolving latest release of {}", cfg.repository);
    let url = release::resolve_latest(cfg)?;
    tracing::info!("resolved archive URL: {}", url);

    let archive_file = ws.archive_path()?;
    tracing::info!("downloading to {}", archive_file.display());
    let fetched = download::fetch(&url, &archive_file);

    let extracted = fetched.and_then(|()| {
        tracing::info!("extracting into {}", req.target_dir.display());
        archive::extract(&archive_file, &req.target_dir)
    });

    // Cleanup runs whether download and extraction succeeded or not.
    ws.cleanup_archive(&archive_file);
    extracted?;

    if req.skip_install {
        tracing::info!("skipping dependency installation");
        return Ok(());
    }
    installer::install(ws.work_dir(), &req.target_dir)
}
