//! Zip extraction with wrapper-directory stripping.
//!
//! Archives generated by the hosting service always contain a single
//! top-level directory (named after the release ref) wrapping the real
//! content. The wrapper name is read from the archive at extraction time,
//! never assumed. After a full extraction the wrapper's contents are merged
//! up into the target directory and the wrapper is removed.

use anyhow::{Context, Result};
use fs_extra::dir::CopyOptions;
use std::fs;
use std::fs::File;
use std::path::Path;
use zip::ZipArchive;

use crate::error::ScaffoldError;

/// Expands the archive at `archive_path` into `target_dir`, leaving the
/// wrapped content directly under `target_dir`.
///
/// A failure mid-extraction leaves `target_dir` partially populated; there
/// is no transactional rollback.
pub fn extract(archive_path: &Path, target_dir: &Path) -> Result<(), ScaffoldError> {
    fs::create_dir_all(target_dir)
        .with_context(|| format!("cannot create {}", target_dir.display()))
        .map_err(ScaffoldError::Workspace)?;

    let file = File::open(archive_path)
        .with_context(|| format!("cannot open {}", archive_path.display()))
        .map_err(ScaffoldError::CorruptArchive)?;
    let mut archive = ZipArchive::new(file)
        .context("not a valid zip archive")
        .map_err(ScaffoldError::CorruptArchive)?;

    let wrapper = wrapper_name(&mut archive)?;
    tracing::debug!("archive wrapper directory: {}", wrapper);

    archive
        .extract(target_dir)
        .context("archive extraction failed")
        .map_err(ScaffoldError::CorruptArchive)?;
    // The archive handle is dropped here on every path below.

    merge_wrapper(&target_dir.join(&wrapper), target_dir)
}

/// Reads the name of the single top-level wrapper directory (entry 0).
fn wrapper_name(archive: &mut ZipArchive<File>) -> Result<String, ScaffoldError> {
    if archive.len() == 0 {
        return Err(ScaffoldError::UnexpectedArchiveLayout(
            "archive contains no entries".to_string(),
        ));
    }

    let first = archive
        .by_index(0)
        .context("cannot read first archive entry")
        .map_err(ScaffoldError::CorruptArchive)?;
    if !first.is_dir() {
        return Err(ScaffoldError::UnexpectedArchiveLayout(format!(
            "first entry `{}` is not a directory",
            first.name()
        )));
    }

    let name = first.name().trim_end_matches('/').to_string();
    if name.is_empty() || name.contains('/') || name == ".." {
        return Err(ScaffoldError::UnexpectedArchiveLayout(format!(
            "wrapper entry `{}` is not a plain directory name",
            first.name()
        )));
    }
    Ok(name)
}

/// Moves everything under `wrapper` up into `target_dir` (overwriting on
/// conflict), then removes the emptied wrapper.
fn merge_wrapper(wrapper: &Path, target_dir: &Path) -> Result<(), ScaffoldError> {
    if !wrapper.is_dir() {
        return Err(ScaffoldError::UnexpectedArchiveLayout(format!(
            "wrapper directory `{}` missing after extraction",
            wrapper.display()
        )));
    }

    let options = CopyOptions::new().overwrite(true).content_only(true);
    fs_extra::dir::copy(wrapper, target_dir, &options)
        .with_context(|| {
            format!(
                "merging `{}` into `{}`",
                wrapper.display(),
                target_dir.display()
            )
        })
        .map_err(ScaffoldError::Workspace)?;

    fs::remove_dir_all(wrapper)
        .with_context(|| format!("removing wrapper `{}`", wrapper.display()))
        .map_err(ScaffoldError::Workspace)?;

    Ok(())
}
